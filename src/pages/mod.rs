//! View models for each routed page.
//!
//! Remote failures never escape a page: loads degrade to an empty or
//! not-found view and the fault is logged.

pub mod browse;
pub mod dashboard;
pub mod home;
pub mod profile;
pub mod request;

use tracing::{error, instrument};

use crate::clients::CelebrityClient;
use crate::domain::Celebrity;

pub use browse::*;
pub use dashboard::*;
pub use home::*;
pub use profile::*;
pub use request::*;

/// Loads one celebrity for a detail page; a failed call reads as "not found".
#[instrument(skip(client))]
pub async fn load_celebrity(client: &CelebrityClient, id: &str) -> Option<Celebrity> {
    match client.find(id).await {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, "Error loading celebrity");
            None
        }
    }
}
