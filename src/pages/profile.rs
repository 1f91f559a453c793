use tracing::instrument;

use super::load_celebrity;
use crate::clients::CelebrityClient;
use crate::domain::Celebrity;
use crate::format::{format_price, format_response_time};
use crate::shell::Route;

/// Formatted profile details.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub celebrity: Celebrity,
    pub price: String,
    pub response_time: String,
    pub happy_customers: String,
    pub request_target: Route,
}

impl ProfileView {
    pub fn new(celebrity: Celebrity) -> Self {
        Self {
            price: format_price(celebrity.price_cents),
            response_time: format_response_time(celebrity.response_time_hours),
            happy_customers: format!("{} happy customers", celebrity.total_reviews),
            request_target: Route::RequestVideo(celebrity.id.clone()),
            celebrity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfilePage {
    NotFound,
    Profile(Box<ProfileView>),
}

impl ProfilePage {
    #[instrument(skip(client))]
    pub async fn load(client: &CelebrityClient, id: &str) -> Self {
        match load_celebrity(client, id).await {
            Some(celebrity) => ProfilePage::Profile(Box::new(ProfileView::new(celebrity))),
            None => ProfilePage::NotFound,
        }
    }
}
