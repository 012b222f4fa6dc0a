//! Cart-count indicator.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Something that displays the total number of items in the cart.
///
/// The cart store calls [`CartBadge::show`] after every applied mutation and
/// whenever [`super::CartStore::badge`] is called. A store without a badge
/// simply skips the call.
pub trait CartBadge {
    fn show(&self, count: u64);
}

impl<F: Fn(u64)> CartBadge for F {
    fn show(&self, count: u64) {
        self(count);
    }
}

/// An in-memory badge that remembers the last count it was shown.
#[derive(Debug, Default)]
pub struct BadgeCell {
    count: AtomicU64,
    refreshes: AtomicUsize,
}

impl BadgeCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last count shown, or 0 if never refreshed.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// How many times the badge has been refreshed.
    #[must_use]
    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::Relaxed)
    }
}

impl CartBadge for BadgeCell {
    fn show(&self, count: u64) {
        self.count.store(count, Ordering::Relaxed);
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }
}
