use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason tag attached to a video request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    Birthday,
    Anniversary,
    Graduation,
    Wedding,
    #[serde(rename = "Get Well Soon")]
    GetWellSoon,
    Congratulations,
    #[serde(rename = "Holiday Greeting")]
    HolidayGreeting,
    #[serde(rename = "Just Because")]
    JustBecause,
    Other,
}

impl Occasion {
    pub const ALL: [Occasion; 9] = [
        Occasion::Birthday,
        Occasion::Anniversary,
        Occasion::Graduation,
        Occasion::Wedding,
        Occasion::GetWellSoon,
        Occasion::Congratulations,
        Occasion::HolidayGreeting,
        Occasion::JustBecause,
        Occasion::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Occasion::Birthday => "Birthday",
            Occasion::Anniversary => "Anniversary",
            Occasion::Graduation => "Graduation",
            Occasion::Wedding => "Wedding",
            Occasion::GetWellSoon => "Get Well Soon",
            Occasion::Congratulations => "Congratulations",
            Occasion::HolidayGreeting => "Holiday Greeting",
            Occasion::JustBecause => "Just Because",
            Occasion::Other => "Other",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown occasion: {0}")]
pub struct UnknownOccasion(pub String);

impl FromStr for Occasion {
    type Err = UnknownOccasion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Occasion::ALL
            .into_iter()
            .find(|o| o.label() == s)
            .ok_or_else(|| UnknownOccasion(s.to_string()))
    }
}

/// Lifecycle of a request. Only `Pending` is ever written from this crate;
/// later transitions happen on the fulfilment side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the request still waits on the celebrity.
    pub fn is_open(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::InProgress)
    }
}

/// A user's order for a personalized video from one celebrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    pub id: String,
    pub user_id: String,
    pub celebrity_id: String,
    pub occasion: Occasion,
    pub recipient_name: String,
    pub custom_message: String,
    #[serde(default)]
    pub special_instructions: Option<String>,
    /// Snapshot of the celebrity's price when the request was made.
    pub price_paid_cents: u64,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}
