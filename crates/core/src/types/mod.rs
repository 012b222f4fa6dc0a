//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod rating;

pub use id::{CatalogId, OrderId};
pub use price::{CurrencyCode, Price, UnknownCurrency, coerce_amount, format_amount};
pub use rating::{Rating, RatingError};
