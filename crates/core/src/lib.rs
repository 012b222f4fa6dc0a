//! Bazaar Core - catalog, cart and checkout library.
//!
//! This crate provides everything the Bazaar shop needs apart from the
//! presentation layer:
//! - a read-only product catalog
//! - a shopping cart persisted as JSON under one key of a string key-value store
//! - listing (search, category filter, price sort) and checkout
//!
//! # Architecture
//!
//! The core crate contains no file or network I/O. Persistence goes through
//! the [`storage::KeyValueStore`] trait and the cart-count indicator through
//! [`cart::CartBadge`], so front ends (the `bazaar` CLI, a browser build, tests)
//! supply their own.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and ratings
//! - [`catalog`] - The product lookup table
//! - [`cart`] - The persisted cart store
//! - [`listing`] - Shop page filtering and sorting
//! - [`checkout`] - Order summary and placement
//! - [`storage`] - The key-value store trait and an in-memory implementation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod listing;
pub mod storage;
pub mod types;

pub use cart::{BadgeCell, CartBadge, CartError, CartLine, CartStore, DEFAULT_CART_KEY, Mutation};
pub use catalog::{Catalog, CatalogError, CatalogItem};
pub use checkout::{CartSummary, Receipt, SummaryLine, place_order};
pub use listing::{ListingQuery, SortOrder, browse};
pub use storage::{KeyValueStore, MemoryStore};
pub use types::*;
