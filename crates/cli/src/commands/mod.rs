//! Subcommand implementations.
//!
//! Each command returns the text to print rather than printing it, so the
//! binary decides where output goes and tests can assert on it.

pub mod cart;
pub mod checkout;
pub mod shop;

use bazaar_core::CartError;
use thiserror::Error;

/// Errors surfaced to the user by a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart store failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// No catalog item has this id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No cart line at this 1-based position.
    #[error("No cart line at position {position} (cart has {len} lines)")]
    NoSuchLine {
        /// Position as typed by the user.
        position: usize,
        /// Number of lines in the cart.
        len: usize,
    },

    /// Checkout was requested with nothing in the cart.
    #[error("Your cart is empty; nothing to check out")]
    EmptyCart,
}

/// Convert a 1-based position typed by the user to a cart index.
///
/// Position 0 maps to `usize::MAX`, which is always out of range.
const fn to_index(position: usize) -> usize {
    match position.checked_sub(1) {
        Some(index) => index,
        None => usize::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(1), 0);
        assert_eq!(to_index(3), 2);
        assert_eq!(to_index(0), usize::MAX);
    }
}
