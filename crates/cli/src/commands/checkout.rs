//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! # Show the order summary without placing the order
//! bazaar checkout --summary
//!
//! # Place the order and empty the cart
//! bazaar checkout
//! ```

use bazaar_core::{CartStore, CartSummary, KeyValueStore, Price, place_order};

use super::CommandError;

/// Render the order total the checkout page shows before submitting.
///
/// # Errors
///
/// Returns an error if the cart store fails.
pub fn summary<S: KeyValueStore>(cart: &CartStore<'_, S>) -> Result<String, CommandError> {
    let summary = CartSummary::for_store(cart)?;
    let total = Price::new(summary.total, cart.currency_code());
    Ok(format!(
        "Order Total: {} ({} item(s))",
        total.display_fixed(),
        summary.item_count
    ))
}

/// Place the order.
///
/// # Errors
///
/// Returns [`CommandError::EmptyCart`] if there is nothing to order, or an
/// error if the cart store fails.
pub fn place<S: KeyValueStore>(cart: &CartStore<'_, S>) -> Result<String, CommandError> {
    let receipt = place_order(cart)?.ok_or(CommandError::EmptyCart)?;
    Ok(format!(
        "Order placed successfully!\nOrder: {}\nPlaced: {}\nItems: {}\nOrder Total: {}",
        receipt.order_id,
        receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        receipt.summary.item_count,
        receipt.total_display(),
    ))
}
