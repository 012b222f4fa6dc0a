//! Cart line items and decoding of stored records.
//!
//! Stored records are decoded field by field from `serde_json::Value` rather
//! than through a derived `Deserialize`, because older records use `qty`
//! instead of `quantity` and may carry the price as a formatted string.
//! Anything unexpected degrades to an empty string or zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::CatalogItem;
use crate::types::{CatalogId, coerce_amount};

/// Field name used by the current schema.
const QUANTITY: &str = "quantity";
/// Field name used by the legacy schema.
const LEGACY_QUANTITY: &str = "qty";

/// One product in the cart, with name/image/price copied from the catalog
/// when it was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CatalogId,
    pub name: String,
    pub image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a catalog item into a new line.
    #[must_use]
    pub fn snapshot(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price,
            quantity,
        }
    }

    /// `price × quantity`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or_else(|| {
                tracing::warn!(id = %self.id, "line total overflowed; saturating");
                saturated(self.price)
            })
    }
}

/// Sum amounts, saturating at the `Decimal` bounds.
#[must_use]
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).unwrap_or_else(|| {
            tracing::warn!("cart total overflowed; saturating");
            saturated(amount)
        })
    })
}

fn saturated(sign_of: Decimal) -> Decimal {
    if sign_of.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Sum of quantities across lines.
#[must_use]
pub fn total_quantity(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// A decoded record and whether it used the legacy schema.
#[derive(Debug)]
pub(crate) struct Decoded {
    pub line: CartLine,
    pub migrated: bool,
}

/// Decode one stored record. Non-object records are dropped.
pub(crate) fn decode_line(value: Value, position: usize) -> Option<Decoded> {
    let Value::Object(mut fields) = value else {
        tracing::warn!(position, "dropping cart record that is not an object");
        return None;
    };

    let legacy = fields.remove(LEGACY_QUANTITY);
    let (quantity, migrated) = match (fields.get(QUANTITY), legacy) {
        (None, Some(qty)) => (coerce_quantity(&qty), true),
        // Both present: the current field wins, the stale one is dropped.
        (Some(current), Some(_)) => (coerce_quantity(current), true),
        (Some(current), None) => (coerce_quantity(current), false),
        (None, None) => (0, false),
    };
    if migrated {
        tracing::debug!(position, quantity, "migrated legacy qty field");
    }

    let line = CartLine {
        id: CatalogId::new(coerce_id(fields.get("id"))),
        name: string_field(&fields, "name"),
        image: string_field(&fields, "image"),
        price: fields.get("price").map_or(Decimal::ZERO, coerce_amount),
        quantity,
    };
    Some(Decoded { line, migrated })
}

fn coerce_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> String {
    match fields.get(name) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Coerce a stored quantity to a whole, non-negative count.
///
/// Numeric strings are accepted, fractions are floored, and anything
/// negative, non-finite or non-numeric becomes zero.
pub(crate) fn coerce_quantity(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map_or_else(|| n.as_f64().map_or(0, whole_count), saturate_u32),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0
            } else {
                trimmed.parse::<f64>().map_or(0, whole_count)
            }
        }
        Value::Bool(true) => 1,
        _ => 0,
    }
}

fn saturate_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_count(n: f64) -> u32 {
    if n.is_finite() && n >= 1.0 {
        n.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_current_schema() {
        let decoded = decode_line(
            json!({"id": "apple-watch", "name": "Apple Watch", "image": "w.png", "price": 7000, "quantity": 2}),
            0,
        )
        .unwrap();
        assert!(!decoded.migrated);
        assert_eq!(decoded.line.id.as_str(), "apple-watch");
        assert_eq!(decoded.line.quantity, 2);
        assert_eq!(decoded.line.price, Decimal::from(7000));
    }

    #[test]
    fn test_decode_legacy_qty() {
        let decoded = decode_line(json!({"id": "hp-envy", "qty": "3", "price": "Rs. 250,000"}), 0).unwrap();
        assert!(decoded.migrated);
        assert_eq!(decoded.line.quantity, 3);
        assert_eq!(decoded.line.price, Decimal::from(250_000));
        assert_eq!(decoded.line.name, "");
    }

    #[test]
    fn test_decode_both_fields_prefers_current() {
        let decoded = decode_line(json!({"id": "a", "qty": 9, "quantity": 2}), 0).unwrap();
        assert!(decoded.migrated);
        assert_eq!(decoded.line.quantity, 2);
    }

    #[test]
    fn test_decode_drops_non_objects() {
        assert!(decode_line(json!("apple-watch"), 0).is_none());
        assert!(decode_line(json!(null), 1).is_none());
        assert!(decode_line(json!([1, 2]), 2).is_none());
    }

    #[test]
    fn test_decode_malformed_fields_zeroed() {
        let decoded = decode_line(json!({"id": 42, "name": 5, "price": "n/a", "quantity": "lots"}), 0).unwrap();
        assert_eq!(decoded.line.id.as_str(), "42");
        assert_eq!(decoded.line.name, "");
        assert_eq!(decoded.line.price, Decimal::ZERO);
        assert_eq!(decoded.line.quantity, 0);
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity(&json!(4)), 4);
        assert_eq!(coerce_quantity(&json!(2.9)), 2);
        assert_eq!(coerce_quantity(&json!(" 5 ")), 5);
        assert_eq!(coerce_quantity(&json!(-3)), 0);
        assert_eq!(coerce_quantity(&json!("")), 0);
        assert_eq!(coerce_quantity(&json!(null)), 0);
        assert_eq!(coerce_quantity(&json!(true)), 1);
        assert_eq!(coerce_quantity(&json!(1e12)), u32::MAX);
    }

    #[test]
    fn test_serializes_price_as_number() {
        let line = CartLine {
            id: CatalogId::from("water-bottle"),
            name: "Water Bottle for Kids".to_owned(),
            image: "images/water-bottle.png".to_owned(),
            price: Decimal::from(1500),
            quantity: 1,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert!(value["price"].is_number());
        assert_eq!(value["price"].as_f64(), Some(1500.0));
        assert_eq!(value["quantity"], json!(1));
        assert!(value.get("qty").is_none());
    }

    #[test]
    fn test_line_total_and_total_quantity() {
        let line = CartLine {
            id: CatalogId::from("a"),
            name: String::new(),
            image: String::new(),
            price: "19.99".parse().unwrap(),
            quantity: 3,
        };
        assert_eq!(line.line_total(), "59.97".parse::<Decimal>().unwrap());
        assert_eq!(total_quantity(&[line.clone(), line]), 6);
    }

    #[test]
    fn test_line_total_saturates() {
        let mut line = decode_line(json!({"id": "x", "price": 1e28, "quantity": 100}), 0)
            .unwrap()
            .line;
        assert_eq!(line.line_total(), Decimal::MAX);

        line.price = -line.price;
        assert_eq!(line.line_total(), Decimal::MIN);
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, Decimal::NEGATIVE_ONE]), Decimal::MIN);
        assert_eq!(saturating_sum([Decimal::TEN, Decimal::ONE]), Decimal::from(11));
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }
}
