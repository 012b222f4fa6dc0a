//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BAZAAR_STORE_PATH` - JSON file holding the key-value store (default: `.bazaar/store.json`)
//! - `BAZAAR_CART_KEY` - Store key the cart lives under (default: `cart`)
//! - `BAZAAR_CATALOG_PATH` - Catalog file; `.yaml`/`.yml` or JSON (default: built-in demo catalog)
//! - `BAZAAR_CURRENCY` - Display currency code (default: `PKR`)

use std::path::{Path, PathBuf};

use bazaar_core::{Catalog, CatalogError, CurrencyCode, DEFAULT_CART_KEY};
use thiserror::Error;

const DEFAULT_STORE_PATH: &str = ".bazaar/store.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read catalog {path}: {source}")]
    ReadCatalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Bazaar CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BazaarConfig {
    /// File backing the key-value store
    pub store_path: PathBuf,
    /// Key the cart is stored under
    pub cart_key: String,
    /// Catalog file; `None` uses the built-in demo catalog
    pub catalog_path: Option<PathBuf>,
    /// Currency used for display
    pub currency: CurrencyCode,
}

impl Default for BazaarConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            cart_key: DEFAULT_CART_KEY.to_owned(),
            catalog_path: None,
            currency: CurrencyCode::default(),
        }
    }
}

impl BazaarConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_path = get("BAZAAR_STORE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from);
        let cart_key = get("BAZAAR_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_owned());
        let catalog_path = get("BAZAAR_CATALOG_PATH").map(PathBuf::from);
        let currency = match get("BAZAAR_CURRENCY") {
            Some(code) => code.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("BAZAAR_CURRENCY".to_string(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            store_path,
            cart_key,
            catalog_path,
            currency,
        })
    }

    /// Load the configured catalog, or the demo catalog if none is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog file cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => Ok(Catalog::demo()),
        }
    }
}

fn load_catalog_file(path: &Path) -> Result<Catalog, ConfigError> {
    let input = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadCatalog {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed = if is_yaml {
        Catalog::from_yaml_str(&input)
    } else {
        Catalog::from_json_str(&input)
    };

    let catalog = parsed.map_err(|source| ConfigError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), items = catalog.len(), "Loaded catalog");
    Ok(catalog)
}
