//! Cart commands.
//!
//! Positions are 1-based as shown by `bazaar cart show`.
//!
//! # Usage
//!
//! ```bash
//! bazaar cart add apple-watch -q 2
//! bazaar cart show
//! bazaar cart update 1 5
//! bazaar cart remove 1
//! bazaar cart clear
//! ```

use bazaar_core::{BadgeCell, CartStore, CartSummary, KeyValueStore, Mutation};

use super::{CommandError, to_index};

/// Render the cart table with line totals and the grand total.
///
/// # Errors
///
/// Returns an error if the cart store fails.
pub fn show<S: KeyValueStore>(cart: &CartStore<'_, S>) -> Result<String, CommandError> {
    let summary = CartSummary::for_store(cart)?;
    if summary.is_empty() {
        return Ok("Your cart is empty.".to_owned());
    }

    let name_width = summary
        .lines
        .iter()
        .map(|l| l.line.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = summary
        .lines
        .iter()
        .map(|entry| {
            format!(
                "{:>3}. {:<name_width$}  x{:<4} {:>14}",
                entry.index + 1,
                entry.line.name,
                entry.line.quantity,
                cart.currency(entry.line_total),
            )
        })
        .collect();
    lines.push(format!("Total: {}", cart.currency(summary.total)));
    lines.push(format!("Items: {}", summary.item_count));
    Ok(lines.join("\n"))
}

/// Add a product and report the new item count.
///
/// # Errors
///
/// Returns [`CommandError::ProductNotFound`] for an unknown id, or an error
/// if the cart store fails.
pub fn add<S: KeyValueStore>(
    cart: &CartStore<'_, S>,
    badge: &BadgeCell,
    id: &str,
    quantity: u32,
) -> Result<String, CommandError> {
    match cart.add(id, quantity)? {
        Mutation::Applied => {}
        Mutation::UnknownProduct | Mutation::OutOfRange => {
            return Err(CommandError::ProductNotFound(id.to_owned()));
        }
    }

    let name = cart.catalog().get(id).map_or(id, |item| item.name.as_str());
    Ok(format!(
        "{name} (x{}) added to cart\n{}",
        quantity.max(1),
        badge_line(badge)
    ))
}

/// Set the quantity at a 1-based position.
///
/// # Errors
///
/// Returns [`CommandError::NoSuchLine`] if the position is out of range, or
/// an error if the cart store fails.
pub fn update<S: KeyValueStore>(
    cart: &CartStore<'_, S>,
    badge: &BadgeCell,
    position: usize,
    quantity: u32,
) -> Result<String, CommandError> {
    match cart.update_at(to_index(position), quantity)? {
        Mutation::Applied => Ok(format!(
            "Line {position} set to x{}\n{}",
            quantity.max(1),
            badge_line(badge)
        )),
        Mutation::OutOfRange | Mutation::UnknownProduct => Err(no_such_line(cart, position)?),
    }
}

/// Remove the line at a 1-based position.
///
/// # Errors
///
/// Returns [`CommandError::NoSuchLine`] if the position is out of range, or
/// an error if the cart store fails.
pub fn remove<S: KeyValueStore>(
    cart: &CartStore<'_, S>,
    badge: &BadgeCell,
    position: usize,
) -> Result<String, CommandError> {
    match cart.remove_at(to_index(position))? {
        Mutation::Applied => Ok(format!("Removed line {position}\n{}", badge_line(badge))),
        Mutation::OutOfRange | Mutation::UnknownProduct => Err(no_such_line(cart, position)?),
    }
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart store fails.
pub fn clear<S: KeyValueStore>(cart: &CartStore<'_, S>) -> Result<String, CommandError> {
    cart.clear()?;
    Ok("Cart cleared".to_owned())
}

/// Print just the item count, like the header badge.
///
/// # Errors
///
/// Returns an error if the cart store fails.
pub fn count<S: KeyValueStore>(cart: &CartStore<'_, S>) -> Result<String, CommandError> {
    Ok(cart.badge()?.to_string())
}

fn badge_line(badge: &BadgeCell) -> String {
    format!("Cart: {} item(s)", badge.count())
}

fn no_such_line<S: KeyValueStore>(
    cart: &CartStore<'_, S>,
    position: usize,
) -> Result<CommandError, CommandError> {
    let len = cart.get_all()?.len();
    Ok(CommandError::NoSuchLine { position, len })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{Catalog, MemoryStore};

    use super::*;

    #[test]
    fn test_add_and_show() {
        let catalog = Catalog::demo();
        let badge = BadgeCell::new();
        let cart = CartStore::new(MemoryStore::new(), &catalog).with_badge(&badge);

        let output = add(&cart, &badge, "apple-watch", 2).unwrap();
        assert_eq!(output, "Apple Watch (x2) added to cart\nCart: 2 item(s)");

        add(&cart, &badge, "water-bottle", 1).unwrap();
        let table = show(&cart).unwrap();
        assert!(table.contains("1. Apple Watch"));
        assert!(table.contains("Rs. 14,000"));
        assert!(table.contains("Total: Rs. 15,500"));
        assert!(table.ends_with("Items: 3"));
    }

    #[test]
    fn test_show_empty() {
        let catalog = Catalog::demo();
        let cart = CartStore::new(MemoryStore::new(), &catalog);
        assert_eq!(show(&cart).unwrap(), "Your cart is empty.");
    }

    #[test]
    fn test_add_unknown_product() {
        let catalog = Catalog::demo();
        let badge = BadgeCell::new();
        let cart = CartStore::new(MemoryStore::new(), &catalog).with_badge(&badge);
        assert!(matches!(
            add(&cart, &badge, "unknown-id", 1),
            Err(CommandError::ProductNotFound(_))
        ));
        assert_eq!(count(&cart).unwrap(), "0");
    }

    #[test]
    fn test_update_and_remove_by_position() {
        let catalog = Catalog::demo();
        let badge = BadgeCell::new();
        let cart = CartStore::new(MemoryStore::new(), &catalog).with_badge(&badge);
        add(&cart, &badge, "hp-envy", 1).unwrap();
        add(&cart, &badge, "nike-sneakers", 1).unwrap();

        assert_eq!(
            update(&cart, &badge, 2, 4).unwrap(),
            "Line 2 set to x4\nCart: 5 item(s)"
        );
        assert_eq!(
            remove(&cart, &badge, 1).unwrap(),
            "Removed line 1\nCart: 4 item(s)"
        );
        assert!(matches!(
            remove(&cart, &badge, 0),
            Err(CommandError::NoSuchLine { position: 0, len: 1 })
        ));
        assert!(matches!(
            update(&cart, &badge, 2, 1),
            Err(CommandError::NoSuchLine { position: 2, len: 1 })
        ));
    }

    #[test]
    fn test_clear() {
        let catalog = Catalog::demo();
        let badge = BadgeCell::new();
        let cart = CartStore::new(MemoryStore::new(), &catalog).with_badge(&badge);
        add(&cart, &badge, "hp-envy", 1).unwrap();

        assert_eq!(clear(&cart).unwrap(), "Cart cleared");
        assert_eq!(count(&cart).unwrap(), "0");
    }
}
