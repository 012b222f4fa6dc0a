//! Integration tests for the cart store.
//!
//! These run the cart against the in-memory store and the demo catalog, and
//! check the behaviour a shop page relies on.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use bazaar_core::{BadgeCell, CartStore, Catalog, KeyValueStore, MemoryStore, Mutation};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn stored(storage: &MemoryStore) -> Value {
    serde_json::from_str(&storage.get("cart").unwrap().unwrap()).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_empty_store() {
    let catalog = Catalog::demo();
    let badge = BadgeCell::new();
    let cart = CartStore::new(MemoryStore::new(), &catalog).with_badge(&badge);

    assert!(cart.load().unwrap().is_empty());
    assert_eq!(cart.badge().unwrap(), 0);
    assert_eq!(badge.count(), 0);
}

#[test]
fn test_add_two_watches() {
    let catalog = Catalog::demo();
    let cart = CartStore::new(MemoryStore::new(), &catalog);

    cart.add("apple-watch", 2).unwrap();

    let lines = cart.get_all().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].price, Decimal::from(7000));
}

#[test]
fn test_add_twice_sums_quantity() {
    let catalog = Catalog::demo();
    let cart = CartStore::new(MemoryStore::new(), &catalog);

    cart.add("apple-watch", 1).unwrap();
    cart.add("apple-watch", 3).unwrap();

    let lines = cart.get_all().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 4);
}

#[test]
fn test_add_unknown_id_leaves_cart_unchanged() {
    let catalog = Catalog::demo();
    let storage = MemoryStore::new();
    let cart = CartStore::new(&storage, &catalog);
    cart.add("hp-envy", 1).unwrap();
    let before = storage.get("cart").unwrap();

    assert_eq!(cart.add("unknown-id", 1).unwrap(), Mutation::UnknownProduct);
    assert_eq!(storage.get("cart").unwrap(), before);
}

// =============================================================================
// Persisted format
// =============================================================================

#[test]
fn test_persisted_shape() {
    let catalog = Catalog::demo();
    let storage = MemoryStore::new();
    let cart = CartStore::new(&storage, &catalog);
    cart.add("leather-laptop-bag", 1).unwrap();

    let value = stored(&storage);
    let record = value[0].as_object().unwrap();
    let mut keys: Vec<&str> = record.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["id", "image", "name", "price", "quantity"]);
    assert_eq!(record["id"], json!("leather-laptop-bag"));
    assert_eq!(record["price"].as_f64(), Some(5300.0));
    assert_eq!(record["quantity"], json!(1));
}

#[test]
fn test_legacy_migration_is_idempotent() {
    let catalog = Catalog::demo();
    let storage = MemoryStore::with_entry(
        "cart",
        json!([
            {"id": "water-bottle", "name": "Water Bottle for Kids", "image": "b.png", "price": "Rs. 1,500", "qty": 2},
            {"id": "apple-watch", "name": "Apple Watch", "image": "w.png", "price": 7000, "quantity": 1}
        ])
        .to_string(),
    );
    let cart = CartStore::new(&storage, &catalog);

    let first = cart.load().unwrap();
    assert_eq!(first[0].quantity, 2);
    assert_eq!(first[0].price, Decimal::from(1500));

    let migrated = stored(&storage);
    assert!(migrated[0].get("qty").is_none());
    assert_eq!(migrated[0]["quantity"], json!(2));

    let text_after_first = storage.get("cart").unwrap();
    let second = cart.load().unwrap();
    assert_eq!(first, second);
    assert_eq!(storage.get("cart").unwrap(), text_after_first);
}

#[test]
fn test_unparsable_string_price_becomes_zero() {
    let catalog = Catalog::demo();
    let storage = MemoryStore::with_entry(
        "cart",
        json!([{"id": "hp-envy", "name": "HP", "image": "", "price": "TBD", "quantity": 1}]).to_string(),
    );
    let cart = CartStore::new(&storage, &catalog);
    assert_eq!(cart.get_all().unwrap()[0].price, Decimal::ZERO);
}

#[test]
fn test_out_of_range_leaves_cart_unchanged() {
    let catalog = Catalog::demo();
    let storage = MemoryStore::new();
    let cart = CartStore::new(&storage, &catalog);
    cart.add("hp-envy", 1).unwrap();
    cart.add("nike-sneakers", 2).unwrap();
    let before = cart.get_all().unwrap();

    assert_eq!(cart.update_at(2, 5).unwrap(), Mutation::OutOfRange);
    assert_eq!(cart.remove_at(7).unwrap(), Mutation::OutOfRange);
    assert_eq!(cart.get_all().unwrap(), before);
}

#[test]
fn test_quantity_never_below_one() {
    let catalog = Catalog::demo();
    let cart = CartStore::new(MemoryStore::new(), &catalog);

    cart.add("hp-envy", 0).unwrap();
    cart.add("dyson-airwrap", 3).unwrap();
    cart.update_at(1, 0).unwrap();
    cart.add("hp-envy", 0).unwrap();
    cart.remove_at(0).unwrap();
    cart.update_at(0, 0).unwrap();

    let lines = cart.get_all().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines.iter().all(|l| l.quantity >= 1));
}
