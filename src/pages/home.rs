use tracing::{error, info, instrument};

use crate::catalog::{featured, quick_filter, BrowseParams, CategoryFilter, SortKey};
use crate::clients::CelebrityClient;
use crate::config::MarketConfig;
use crate::domain::Celebrity;
use crate::shell::Route;

/// Landing page data: the top-rated slice of the catalog and its featured picks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomePage {
    pub celebrities: Vec<Celebrity>,
    pub featured: Vec<Celebrity>,
}

impl HomePage {
    #[instrument(skip(client, config))]
    pub async fn load(client: &CelebrityClient, config: &MarketConfig) -> Self {
        match client.catalog(SortKey::RatingDesc, config.catalog_limit).await {
            Ok(celebrities) => {
                let featured = featured(&celebrities, config.featured_limit);
                info!(
                    celebrities = celebrities.len(),
                    featured = featured.len(),
                    "Home page loaded"
                );
                Self {
                    celebrities,
                    featured,
                }
            }
            Err(e) => {
                error!(error = %e, "Error loading celebrities");
                Self::default()
            }
        }
    }

    /// Live results under the hero search bar.
    pub fn matching(&self, term: &str, category: CategoryFilter) -> Vec<Celebrity> {
        quick_filter(&self.celebrities, term, category)
    }
}

/// Where the hero search sends the user. A blank term only carries the category.
pub fn search_target(term: &str, category: CategoryFilter) -> Route {
    let search = (!term.trim().is_empty()).then(|| term.to_string());
    Route::Browse(BrowseParams::new(search, category))
}

/// Trending chips on the home page search across all categories.
pub fn trending_target(term: &str) -> Route {
    Route::Browse(BrowseParams::new(Some(term.to_string()), CategoryFilter::All))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn test_search_target() {
        assert_eq!(
            search_target("  ", CategoryFilter::Only(Category::Music)).to_path(),
            "/browse?category=Music"
        );
        assert_eq!(
            search_target("lena", CategoryFilter::All).to_path(),
            "/browse?search=lena"
        );
        assert_eq!(trending_target("Roast").to_path(), "/browse?search=Roast");
    }
}
