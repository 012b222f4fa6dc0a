//! Bazaar CLI library.
//!
//! The `bazaar` binary is a thin clap front end over these modules; they are
//! exposed as a library so the integration tests can drive them directly.
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration
//! - [`store`] - JSON-file key-value store backing the cart
//! - [`commands`] - Subcommand implementations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod store;

pub use commands::CommandError;
pub use config::{BazaarConfig, ConfigError};
pub use store::{FileStore, FileStoreError};
