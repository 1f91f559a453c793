use std::env;
use std::fmt::Display;
use std::fs::read_to_string;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::Celebrity;

/// Catalog shipped with the binary, used when no seed file is configured.
const BUNDLED_CATALOG: &str = include_str!("../data/celebrities.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed seed catalog: {0}")]
    SeedParse(#[from] serde_json::Error),
}

/// Runtime knobs, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Mailbox size of every actor.
    pub channel_buffer: usize,
    /// Rows fetched for the home and browse pages.
    pub catalog_limit: usize,
    pub featured_limit: usize,
    /// Upper end of the browse price slider.
    pub price_ceiling_dollars: u64,
    pub seed_file: Option<PathBuf>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            catalog_limit: 50,
            featured_limit: 6,
            price_ceiling_dollars: 500,
            seed_file: None,
        }
    }
}

impl MarketConfig {
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            channel_buffer: try_load(&lookup, "MARKET_CHANNEL_BUFFER", defaults.channel_buffer)?,
            catalog_limit: try_load(&lookup, "MARKET_CATALOG_LIMIT", defaults.catalog_limit)?,
            featured_limit: try_load(&lookup, "MARKET_FEATURED_LIMIT", defaults.featured_limit)?,
            price_ceiling_dollars: try_load(
                &lookup,
                "MARKET_PRICE_CEILING_DOLLARS",
                defaults.price_ceiling_dollars,
            )?,
            seed_file: lookup("MARKET_SEED_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// The celebrity records the in-process store starts with.
    #[instrument(skip(self))]
    pub fn load_catalog(&self) -> Result<Vec<Celebrity>, ConfigError> {
        let raw = match &self.seed_file {
            Some(path) => read_to_string(path).map_err(|source| ConfigError::SeedRead {
                path: path.clone(),
                source,
            })?,
            None => BUNDLED_CATALOG.to_string(),
        };
        let catalog: Vec<Celebrity> = serde_json::from_str(&raw)?;
        info!(records = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
