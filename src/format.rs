//! Display strings for prices, response times, dates and request status.

use chrono::{DateTime, Utc};

use crate::domain::RequestStatus;

/// Whole dollars, rounded half up: `12550` cents is `"$126"`.
pub fn format_price(cents: u64) -> String {
    format!("${}", cents.saturating_add(50) / 100)
}

/// `"N hours"` under a day, otherwise rounded days.
pub fn format_response_time(hours: u32) -> String {
    if hours < 24 {
        return format!("{hours} hours");
    }
    let days = hours.saturating_add(12) / 24;
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Short US date, e.g. `"Mar 4, 2026"`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

pub fn status_label(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "Pending",
        RequestStatus::InProgress => "In Progress",
        RequestStatus::Completed => "Completed",
        RequestStatus::Cancelled => "Cancelled",
    }
}
