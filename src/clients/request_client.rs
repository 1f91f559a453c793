use tracing::instrument;

use crate::actor_framework::{Direction, ListQuery, ResourceClient};
use crate::domain::VideoRequest;
use crate::error::DataError;

/// Client for the `videoRequests` collection.
#[derive(Clone, Debug)]
pub struct VideoRequestClient {
    inner: ResourceClient<VideoRequest>,
}

impl_collection_client!(VideoRequestClient, VideoRequest, video_request, video_requests);

impl VideoRequestClient {
    /// Requests owned by `user_id`, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<VideoRequest>, DataError> {
        self.list_video_requests(
            ListQuery::new()
                .filter_eq("userId", user_id)
                .order_by("createdAt", Direction::Desc),
        )
        .await
    }
}
