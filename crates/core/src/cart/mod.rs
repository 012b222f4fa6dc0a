//! Persisted shopping cart.
//!
//! [`CartStore`] keeps an ordered list of [`CartLine`]s as a JSON array under
//! one key of a [`KeyValueStore`]. Nothing is cached: every operation reads
//! the whole array, changes it, and writes the whole array back.
//!
//! Reads tolerate malformed data. Records written by older versions (with a
//! `qty` field, or a price like `"Rs. 1,500"`) are normalized on load, and
//! the normalized array is written back once if any record was migrated.
//!
//! Mutations that cannot apply (unknown product id, index out of range)
//! leave the cart untouched and report why through [`Mutation`].

mod badge;
mod line;

use core::fmt;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::storage::KeyValueStore;
use crate::types::{CurrencyCode, Price};

pub use badge::{BadgeCell, CartBadge};
pub use line::{CartLine, saturating_sum, total_quantity};

/// Errors raised by the storage backend or while serializing the cart.
///
/// Malformed stored data is never an error; it is coerced on load.
#[derive(thiserror::Error, Debug)]
pub enum CartError {
    /// The key-value store failed.
    #[error("cart storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn storage_error<E>(err: E) -> CartError
where
    E: std::error::Error + Send + Sync + 'static,
{
    CartError::Storage(Box::new(err))
}

/// Storage key used unless overridden with [`CartStore::with_key`].
pub const DEFAULT_CART_KEY: &str = "cart";

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The cart was changed and persisted.
    Applied,
    /// The product id is not in the catalog; nothing changed.
    UnknownProduct,
    /// The line index is past the end of the cart; nothing changed.
    OutOfRange,
}

/// Synchronous CRUD over the persisted cart.
pub struct CartStore<'c, S> {
    storage: S,
    catalog: &'c Catalog,
    key: String,
    currency_code: CurrencyCode,
    badge: Option<&'c dyn CartBadge>,
}

impl<S: fmt::Debug> fmt::Debug for CartStore<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("catalog_len", &self.catalog.len())
            .field("key", &self.key)
            .field("currency_code", &self.currency_code)
            .field("badge", &self.badge.is_some())
            .finish()
    }
}

impl<'c, S: KeyValueStore> CartStore<'c, S> {
    /// Create a store over `storage`, looking products up in `catalog`.
    #[must_use]
    pub fn new(storage: S, catalog: &'c Catalog) -> Self {
        Self {
            storage,
            catalog,
            key: DEFAULT_CART_KEY.to_owned(),
            currency_code: CurrencyCode::default(),
            badge: None,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency_code: CurrencyCode) -> Self {
        self.currency_code = currency_code;
        self
    }

    /// Attach a cart-count indicator.
    #[must_use]
    pub fn with_badge(mut self, badge: &'c dyn CartBadge) -> Self {
        self.badge = Some(badge);
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Read, migrate and coerce the stored cart.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<Vec<CartLine>, CartError> {
        let mut migrated = false;
        let lines: Vec<CartLine> = self
            .read_records()?
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let decoded = line::decode_line(record, position)?;
                migrated |= decoded.migrated;
                Some(decoded.line)
            })
            .collect();

        if migrated {
            tracing::debug!(lines = lines.len(), "persisting migrated cart");
            self.save(&lines)?;
        }
        Ok(lines)
    }

    /// The migrated, coerced cart, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails.
    pub fn get_all(&self) -> Result<Vec<CartLine>, CartError> {
        self.load()
    }

    /// Add `quantity` (at least 1) of a catalog product.
    ///
    /// Increments the existing line for `id` if there is one, otherwise
    /// appends a line snapshotting the catalog's name, image and price.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    #[instrument(skip(self))]
    pub fn add(&self, id: &str, quantity: u32) -> Result<Mutation, CartError> {
        let Some(item) = self.catalog.get(id) else {
            tracing::debug!("ignoring add for unknown catalog id");
            return Ok(Mutation::UnknownProduct);
        };

        let quantity = quantity.max(1);
        let mut lines = self.load()?;
        if let Some(existing) = lines.iter_mut().find(|line| line.id.as_str() == id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            lines.push(CartLine::snapshot(item, quantity));
        }

        self.commit(&lines)?;
        Ok(Mutation::Applied)
    }

    /// Set the quantity of the line at `index`, clamped to at least 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    #[instrument(skip(self))]
    pub fn update_at(&self, index: usize, quantity: u32) -> Result<Mutation, CartError> {
        let mut lines = self.load()?;
        let len = lines.len();
        let Some(line) = lines.get_mut(index) else {
            tracing::debug!(len, "ignoring update past end of cart");
            return Ok(Mutation::OutOfRange);
        };
        line.quantity = quantity.max(1);

        self.commit(&lines)?;
        Ok(Mutation::Applied)
    }

    /// Delete the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    #[instrument(skip(self))]
    pub fn remove_at(&self, index: usize) -> Result<Mutation, CartError> {
        let mut lines = self.load()?;
        if index >= lines.len() {
            tracing::debug!(len = lines.len(), "ignoring remove past end of cart");
            return Ok(Mutation::OutOfRange);
        }
        lines.remove(index);

        self.commit(&lines)?;
        Ok(Mutation::Applied)
    }

    /// Delete the stored cart entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&self) -> Result<(), CartError> {
        self.storage.remove(&self.key).map_err(storage_error)?;
        self.refresh_badge(&[]);
        Ok(())
    }

    /// Total quantity across all lines.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails.
    pub fn item_count(&self) -> Result<u64, CartError> {
        Ok(total_quantity(&self.load()?))
    }

    /// Recompute the total quantity and show it on the attached badge.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails.
    pub fn badge(&self) -> Result<u64, CartError> {
        let lines = self.load()?;
        Ok(self.refresh_badge(&lines))
    }

    /// Format an amount in the store's currency, e.g. `"Rs. 10,500"`.
    #[must_use]
    pub fn currency(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency_code).display()
    }

    fn read_records(&self) -> Result<Vec<Value>, CartError> {
        let Some(text) = self.storage.get(&self.key).map_err(storage_error)? else {
            return Ok(Vec::new());
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(_) => {
                tracing::warn!("stored cart is not a JSON array; treating as empty");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored cart is not valid JSON; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CartError> {
        let text = serde_json::to_string(lines)?;
        self.storage.set(&self.key, &text).map_err(storage_error)
    }

    fn commit(&self, lines: &[CartLine]) -> Result<(), CartError> {
        self.save(lines)?;
        self.refresh_badge(lines);
        Ok(())
    }

    fn refresh_badge(&self, lines: &[CartLine]) -> u64 {
        let count = total_quantity(lines);
        if let Some(badge) = self.badge {
            badge.show(count);
        }
        count
    }
}
