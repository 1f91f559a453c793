//! Catalog browsing: the filter/sort engine and the browse URL parameters.

pub mod filter;
pub mod params;

pub use filter::*;
pub use params::*;
