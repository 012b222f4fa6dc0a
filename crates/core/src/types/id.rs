//! Newtype IDs for type-safe entity references.
//!
//! Catalog entries are keyed by human-readable slugs (`"apple-watch"`),
//! orders by random UUIDs. Wrapping both keeps them from being mixed up with
//! plain strings such as product names.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slug identifying a catalog item, e.g. `"apple-watch"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CatalogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for CatalogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashMap<CatalogId, _>` be queried with a plain `&str`.
impl Borrow<str> for CatalogId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a fresh random order ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
