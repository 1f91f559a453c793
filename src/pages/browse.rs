use tracing::{error, info, instrument};

use crate::catalog::{filter_catalog, BrowseParams, CatalogQuery, PriceRange, SortKey};
use crate::clients::CelebrityClient;
use crate::domain::Celebrity;

/// Browse page results for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowsePage {
    pub query: CatalogQuery,
    pub results: Vec<Celebrity>,
}

impl BrowsePage {
    /// Initial query for a URL: search and category from the params, full price
    /// range up to the slider ceiling, default ordering.
    pub fn query_for(params: &BrowseParams, price_ceiling_dollars: u64) -> CatalogQuery {
        CatalogQuery {
            term: params.search_term().to_string(),
            category: params.category,
            price: PriceRange::from_dollars(0, price_ceiling_dollars),
            sort: SortKey::default(),
        }
    }

    /// Fetches the catalog in `query.sort` order and narrows it locally.
    /// A failed fetch shows as no results.
    #[instrument(skip(client))]
    pub async fn load(client: &CelebrityClient, query: CatalogQuery, limit: usize) -> Self {
        let fetched = match client.catalog(query.sort, limit).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Error loading celebrities");
                Vec::new()
            }
        };
        let results = filter_catalog(&fetched, &query);
        info!(fetched = fetched.len(), shown = results.len(), "Browse results ready");
        Self { query, results }
    }

    /// URL state for the current query; price and sort stay out of the URL.
    pub fn params(&self) -> BrowseParams {
        BrowseParams::new(Some(self.query.term.clone()), self.query.category)
    }

    pub fn summary(&self) -> String {
        format!("{} celebrities found", self.results.len())
    }
}
