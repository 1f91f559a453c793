use tracing::warn;
use url::form_urlencoded;

use super::filter::CategoryFilter;

pub const SEARCH_PARAM: &str = "search";
pub const CATEGORY_PARAM: &str = "category";

/// Suggested searches shown under the search bar.
pub const TRENDING_SEARCHES: [&str; 6] = [
    "Birthday wishes",
    "Congratulations",
    "Motivational",
    "Anniversary",
    "Get well soon",
    "Roast",
];

/// Price slider granularity, in dollars.
pub const PRICE_STEP_DOLLARS: u64 = 25;

/// The part of the browse state that lives in the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseParams {
    pub search: Option<String>,
    pub category: CategoryFilter,
}

impl BrowseParams {
    pub fn new(search: Option<String>, category: CategoryFilter) -> Self {
        let search = search.filter(|s| !s.is_empty());
        Self { search, category }
    }

    /// Reads `search` and `category` from a query string, with or without the
    /// leading `?`. Other keys are ignored; an unrecognised category means `All`.
    pub fn from_query(query: &str) -> Self {
        let mut params = BrowseParams::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                SEARCH_PARAM if !value.is_empty() => params.search = Some(value.into_owned()),
                CATEGORY_PARAM => {
                    params.category = value.parse().unwrap_or_else(|e| {
                        warn!(error = %e, "Ignoring category parameter");
                        CategoryFilter::All
                    });
                }
                _ => {}
            }
        }
        params
    }

    /// Query string without the leading `?`. Empty search and `All` are omitted.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            serializer.append_pair(SEARCH_PARAM, search);
        }
        if self.category != CategoryFilter::All {
            serializer.append_pair(CATEGORY_PARAM, self.category.label());
        }
        serializer.finish()
    }

    pub fn to_path(&self) -> String {
        let query = self.to_query();
        if query.is_empty() {
            "/browse".to_string()
        } else {
            format!("/browse?{query}")
        }
    }

    /// Applies a trending term, keeping the current category.
    pub fn with_search(&self, term: &str) -> Self {
        Self::new(Some(term.to_string()), self.category)
    }

    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// Snaps a dollar amount to the slider step and clamps it to the ceiling.
pub fn snap_to_slider(dollars: u64, ceiling_dollars: u64) -> u64 {
    let snapped = (dollars + PRICE_STEP_DOLLARS / 2) / PRICE_STEP_DOLLARS * PRICE_STEP_DOLLARS;
    snapped.min(ceiling_dollars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn test_from_query_reads_known_keys() {
        let params = BrowseParams::from_query("?search=birthday%20wishes&category=Reality+TV&page=2");
        assert_eq!(params.search.as_deref(), Some("birthday wishes"));
        assert_eq!(params.category, CategoryFilter::Only(Category::RealityTv));
    }

    #[test]
    fn test_unknown_or_missing_category_means_all() {
        assert_eq!(BrowseParams::from_query("category=Opera").category, CategoryFilter::All);
        assert_eq!(BrowseParams::from_query("").category, CategoryFilter::All);
        assert_eq!(BrowseParams::from_query("search=").search, None);
    }

    #[test]
    fn test_to_path_omits_defaults() {
        assert_eq!(BrowseParams::default().to_path(), "/browse");

        let params = BrowseParams::new(Some("get well".into()), CategoryFilter::Only(Category::Comedy));
        assert_eq!(params.to_path(), "/browse?search=get+well&category=Comedy");
        assert_eq!(BrowseParams::from_query(&params.to_query()), params);
    }

    #[test]
    fn test_trending_keeps_category() {
        let params = BrowseParams::new(None, CategoryFilter::Only(Category::Music));
        let next = params.with_search(TRENDING_SEARCHES[5]);
        assert_eq!(next.search_term(), "Roast");
        assert_eq!(next.category, CategoryFilter::Only(Category::Music));
    }

    #[test]
    fn test_snap_to_slider() {
        assert_eq!(snap_to_slider(0, 500), 0);
        assert_eq!(snap_to_slider(37, 500), 25);
        assert_eq!(snap_to_slider(38, 500), 50);
        assert_eq!(snap_to_slider(900, 500), 500);
    }
}
