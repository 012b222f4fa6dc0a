//! Order summary and order placement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crate::cart::{CartError, CartLine, CartStore, saturating_sum, total_quantity};
use crate::storage::KeyValueStore;
use crate::types::{CurrencyCode, OrderId, Price};

/// A cart line with its position and computed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Position in the cart, as accepted by `update_at` / `remove_at`.
    pub index: usize,
    pub line: CartLine,
    pub line_total: Decimal,
}

/// Totals for a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub total: Decimal,
    pub item_count: u64,
}

impl CartSummary {
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let summary_lines: Vec<SummaryLine> = lines
            .iter()
            .enumerate()
            .map(|(index, line)| SummaryLine {
                index,
                line: line.clone(),
                line_total: line.line_total(),
            })
            .collect();
        let total = saturating_sum(summary_lines.iter().map(|l| l.line_total));

        Self {
            lines: summary_lines,
            total,
            item_count: total_quantity(lines),
        }
    }

    /// Summarize the cart currently held by `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn for_store<S: KeyValueStore>(store: &CartStore<'_, S>) -> Result<Self, CartError> {
        Ok(Self::from_lines(&store.get_all()?))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub currency_code: CurrencyCode,
    pub summary: CartSummary,
}

impl Receipt {
    /// Order total with two fraction digits, e.g. `"Rs. 17,000.00"`.
    #[must_use]
    pub fn total_display(&self) -> String {
        Price::new(self.summary.total, self.currency_code).display_fixed()
    }
}

/// Place an order for everything in the cart and empty it.
///
/// Returns `Ok(None)` without touching the store when the cart is empty.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
#[instrument(skip(store))]
pub fn place_order<S: KeyValueStore>(store: &CartStore<'_, S>) -> Result<Option<Receipt>, CartError> {
    let summary = CartSummary::for_store(store)?;
    if summary.is_empty() {
        tracing::debug!("cart is empty; no order placed");
        return Ok(None);
    }

    store.clear()?;
    let receipt = Receipt {
        order_id: OrderId::generate(),
        placed_at: Utc::now(),
        currency_code: store.currency_code(),
        summary,
    };
    tracing::info!(
        order_id = %receipt.order_id,
        items = receipt.summary.item_count,
        total = %receipt.summary.total,
        "order placed"
    );
    Ok(Some(receipt))
}
