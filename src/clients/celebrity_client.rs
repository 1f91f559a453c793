use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::actor_framework::{ListQuery, ResourceClient};
use crate::catalog::SortKey;
use crate::domain::Celebrity;
use crate::error::DataError;

/// Client for the `celebrities` collection.
#[derive(Clone, Debug)]
pub struct CelebrityClient {
    inner: ResourceClient<Celebrity>,
}

impl_collection_client!(CelebrityClient, Celebrity, celebrity, celebrities);

impl CelebrityClient {
    /// Looks up a single celebrity by id.
    #[instrument(skip(self))]
    pub async fn find(&self, id: &str) -> Result<Option<Celebrity>, DataError> {
        let rows = self
            .list_celebrities(ListQuery::new().filter_eq("id", id).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Resolves many ids in one round trip. Ids without a record are simply
    /// absent from the map.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn find_many(&self, ids: &[String]) -> Result<HashMap<String, Celebrity>, DataError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = self
            .list_celebrities(ListQuery::new().filter_in("id", ids.iter().map(String::as_str)))
            .await?;
        debug!(found = rows.len(), "Batched lookup resolved");
        Ok(rows.into_iter().map(|c| (c.id.clone(), c)).collect())
    }

    /// The catalog page as the store orders it for `sort`.
    #[instrument(skip(self))]
    pub async fn catalog(&self, sort: SortKey, limit: usize) -> Result<Vec<Celebrity>, DataError> {
        let (field, direction) = sort.order_by();
        self.list_celebrities(ListQuery::new().order_by(field, direction).limit(limit))
            .await
    }
}
