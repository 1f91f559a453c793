use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::actor_framework::Direction;
use crate::domain::{Category, Celebrity, UnknownCategory};

/// `"All"` or one exact category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Pill order on the home and browse pages, `All` first.
    pub fn choices() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive price bounds in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min_cents: u64,
    pub max_cents: u64,
}

impl PriceRange {
    pub fn new(min_cents: u64, max_cents: u64) -> Self {
        Self {
            min_cents,
            max_cents,
        }
    }

    /// Bounds as picked on the dollar slider.
    pub fn from_dollars(min: u64, max: u64) -> Self {
        Self::new(min.saturating_mul(100), max.saturating_mul(100))
    }

    pub fn unbounded() -> Self {
        Self::new(0, u64::MAX)
    }

    pub fn contains(&self, price_cents: u64) -> bool {
        self.min_cents <= price_cents && price_cents <= self.max_cents
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

/// Result ordering on the browse page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    RatingDesc,
    PriceAsc,
    PriceDesc,
    ResponseTimeAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::RatingDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::ResponseTimeAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::RatingDesc => "rating",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::ResponseTimeAsc => "response_time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::RatingDesc => "Highest Rated",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::ResponseTimeAsc => "Fastest Response",
        }
    }

    /// The equivalent `orderBy` for a list call.
    pub fn order_by(&self) -> (&'static str, Direction) {
        match self {
            SortKey::RatingDesc => ("rating", Direction::Desc),
            SortKey::PriceAsc => ("priceCents", Direction::Asc),
            SortKey::PriceDesc => ("priceCents", Direction::Desc),
            SortKey::ResponseTimeAsc => ("responseTimeHours", Direction::Asc),
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Everything the browse page filters and orders by.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub term: String,
    pub category: CategoryFilter,
    pub price: PriceRange,
    pub sort: SortKey,
}

/// Filters `celebrities` by category, free-text term and price, then orders the
/// survivors by `query.sort`. Ties keep their input order.
pub fn filter_catalog(celebrities: &[Celebrity], query: &CatalogQuery) -> Vec<Celebrity> {
    let needle = query.term.trim().to_lowercase();

    let mut hits: Vec<Celebrity> = celebrities
        .iter()
        .filter(|c| query.category.matches(c.category))
        .filter(|c| {
            needle.is_empty()
                || contains_folded(&c.name, &needle)
                || contains_folded(&c.bio, &needle)
                || contains_folded(c.category.label(), &needle)
        })
        .filter(|c| query.price.contains(c.price_cents))
        .cloned()
        .collect();

    sort_catalog(&mut hits, query.sort);
    hits
}

/// Stable in-place ordering by `sort`.
pub fn sort_catalog(celebrities: &mut [Celebrity], sort: SortKey) {
    match sort {
        SortKey::RatingDesc => celebrities.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceAsc => celebrities.sort_by_key(|c| c.price_cents),
        SortKey::PriceDesc => celebrities.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
        SortKey::ResponseTimeAsc => celebrities.sort_by_key(|c| c.response_time_hours),
    }
}

/// Home page search: name or category label only, no bio, no reordering.
pub fn quick_filter(celebrities: &[Celebrity], term: &str, category: CategoryFilter) -> Vec<Celebrity> {
    let needle = term.trim().to_lowercase();
    celebrities
        .iter()
        .filter(|c| category.matches(c.category))
        .filter(|c| {
            needle.is_empty()
                || contains_folded(&c.name, &needle)
                || contains_folded(c.category.label(), &needle)
        })
        .cloned()
        .collect()
}

/// First `limit` featured celebrities, in input order.
pub fn featured(celebrities: &[Celebrity], limit: usize) -> Vec<Celebrity> {
    celebrities
        .iter()
        .filter(|c| c.is_featured)
        .take(limit)
        .cloned()
        .collect()
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn celeb(id: &str, category: Category, price_cents: u64) -> Celebrity {
        Celebrity::new(id, format!("Name {id}"), category, price_cents)
    }

    fn ids(list: &[Celebrity]) -> Vec<&str> {
        list.iter().map(|c| c.id.as_str()).collect()
    }

    fn sample() -> Vec<Celebrity> {
        let mut a = celeb("a", Category::Music, 5_000);
        a.name = "Lena Lark".into();
        a.bio = "Chart-topping pop vocalist".into();
        a.rating = 4.9;
        a.response_time_hours = 72;

        let mut b = celeb("b", Category::Sports, 20_000);
        b.name = "Marcus Dunk".into();
        b.bio = "Retired point guard".into();
        b.rating = 4.7;
        b.response_time_hours = 24;

        let mut c = celeb("c", Category::Comedy, 12_500);
        c.name = "Rita Roast".into();
        c.bio = "Stand-up comic who loves music trivia".into();
        c.rating = 4.9;
        c.response_time_hours = 12;

        let mut d = celeb("d", Category::Music, 30_000);
        d.name = "DJ Volt".into();
        d.bio = "Festival headliner".into();
        d.rating = 4.2;
        d.response_time_hours = 48;

        vec![a, b, c, d]
    }

    #[test]
    fn test_sports_scenario() {
        let list = vec![
            celeb("c1", Category::Music, 50),
            celeb("c2", Category::Sports, 200),
        ];
        let query = CatalogQuery {
            term: String::new(),
            category: CategoryFilter::Only(Category::Sports),
            price: PriceRange::new(0, 500),
            sort: SortKey::RatingDesc,
        };

        assert_eq!(ids(&filter_catalog(&list, &query)), vec!["c2"]);
    }

    #[test]
    fn test_categories_partition_the_catalog() {
        let list = sample();
        let all = filter_catalog(&list, &CatalogQuery::default());

        let mut union = Vec::new();
        for category in Category::ALL {
            let query = CatalogQuery {
                category: CategoryFilter::Only(category),
                ..Default::default()
            };
            let hits = filter_catalog(&list, &query);
            assert!(hits.iter().all(|c| c.category == category));
            union.extend(hits);
        }

        let mut union_ids = ids(&union);
        let mut all_ids = ids(&all);
        union_ids.sort();
        all_ids.sort();
        assert_eq!(union_ids, all_ids);
    }

    #[test]
    fn test_term_matches_name_bio_or_category_case_insensitively() {
        let list = sample();
        let query = CatalogQuery {
            term: "MUSIC".into(),
            ..Default::default()
        };

        let hits = filter_catalog(&list, &query);
        // a and d by category, c by bio
        assert_eq!(ids(&hits), vec!["a", "c", "d"]);
        for c in &hits {
            let haystack = format!("{} {} {}", c.name, c.bio, c.category).to_lowercase();
            assert!(haystack.contains("music"));
        }
    }

    #[test]
    fn test_empty_term_is_unfiltered() {
        let list = sample();
        let query = CatalogQuery {
            term: "   ".into(),
            sort: SortKey::PriceAsc,
            ..Default::default()
        };
        assert_eq!(filter_catalog(&list, &query).len(), list.len());
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let list = sample();
        let query = CatalogQuery {
            price: PriceRange::from_dollars(50, 200),
            sort: SortKey::PriceAsc,
            ..Default::default()
        };

        let hits = filter_catalog(&list, &query);
        assert_eq!(ids(&hits), vec!["a", "c", "b"]);
        assert!(hits.iter().all(|c| (5_000..=20_000).contains(&c.price_cents)));

        let max = list.iter().map(|c| c.price_cents).max().unwrap();
        let query = CatalogQuery {
            price: PriceRange::new(0, max),
            ..Default::default()
        };
        assert_eq!(filter_catalog(&list, &query).len(), list.len());
    }

    #[test]
    fn test_sort_keys() {
        let list = sample();
        let run = |sort| {
            let query = CatalogQuery {
                sort,
                ..Default::default()
            };
            ids(&filter_catalog(&list, &query))
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        // a and c tie on rating and keep input order
        assert_eq!(run(SortKey::RatingDesc), vec!["a", "c", "b", "d"]);
        assert_eq!(run(SortKey::PriceAsc), vec!["a", "c", "b", "d"]);
        assert_eq!(run(SortKey::PriceDesc), vec!["d", "b", "c", "a"]);
        assert_eq!(run(SortKey::ResponseTimeAsc), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(filter_catalog(&[], &CatalogQuery::default()).is_empty());
    }

    #[test]
    fn test_quick_filter_ignores_bio() {
        let list = sample();
        let hits = quick_filter(&list, "music", CategoryFilter::All);
        assert_eq!(ids(&hits), vec!["a", "d"]);

        let hits = quick_filter(&list, "rita", CategoryFilter::Only(Category::Sports));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_featured_takes_first_flagged() {
        let mut list = sample();
        for c in list.iter_mut() {
            c.is_featured = c.id != "b";
        }
        assert_eq!(ids(&featured(&list, 2)), vec!["a", "c"]);
    }

    #[test]
    fn test_category_filter_and_sort_key_parse() {
        assert_eq!("All".parse(), Ok(CategoryFilter::All));
        assert_eq!("Comedy".parse(), Ok(CategoryFilter::Only(Category::Comedy)));
        assert!("Opera".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::choices().count(), 8);

        assert_eq!("price_desc".parse(), Ok(SortKey::PriceDesc));
        assert_eq!("cheapest".parse::<SortKey>(), Err(UnknownSortKey("cheapest".into())));
    }
}
