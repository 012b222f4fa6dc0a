//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store behaviour against an in-memory store
//! - `file_store` - The cart persisted through the CLI's JSON file store
//! - `shop_flow` - Browse, add, update and check out end to end

use std::path::Path;

use bazaar_cli::FileStore;

/// Write a store file holding `cart_json` under the `cart` key, the way an
/// older build of the shop would have left it.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[allow(clippy::unwrap_used)]
pub fn seed_store_file(path: &Path, cart_json: &serde_json::Value) -> FileStore {
    let mut map = serde_json::Map::new();
    map.insert(
        "cart".to_owned(),
        serde_json::Value::String(cart_json.to_string()),
    );
    std::fs::write(path, serde_json::Value::Object(map).to_string()).unwrap();
    FileStore::open(path)
}
