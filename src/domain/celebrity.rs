use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sports,
    Entertainment,
    Music,
    Comedy,
    #[serde(rename = "Reality TV")]
    RealityTv,
    Influencer,
    Business,
}

impl Category {
    /// Display order used by the category pills.
    pub const ALL: [Category; 7] = [
        Category::Sports,
        Category::Entertainment,
        Category::Music,
        Category::Comedy,
        Category::RealityTv,
        Category::Influencer,
        Category::Business,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Music => "Music",
            Category::Comedy => "Comedy",
            Category::RealityTv => "Reality TV",
            Category::Influencer => "Influencer",
            Category::Business => "Business",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A catalog entry for a person offering paid video messages.
///
/// Prices are integer cents and response times are hour counts everywhere in
/// the crate; formatting to dollars and days happens in [`crate::format`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Celebrity {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub bio: String,
    pub price_cents: u64,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    pub rating: f64,
    pub total_reviews: u32,
    pub response_time_hours: u32,
    #[serde(default)]
    pub is_featured: bool,
}

impl Celebrity {
    #[allow(dead_code)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price_cents: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            bio: String::new(),
            price_cents,
            profile_image_url: None,
            rating: 0.0,
            total_reviews: 0,
            response_time_hours: 24,
            is_featured: false,
        }
    }
}
