//! Product rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    /// The value is NaN or infinite.
    #[error("rating must be a finite number")]
    NotFinite,
    /// The value is outside `0..=5`.
    #[error("rating must be between 0 and {max}, got {value}")]
    OutOfRange {
        /// The rejected value.
        value: f32,
        /// Maximum allowed rating.
        max: f32,
    },
}

/// A star rating between 0 and 5 inclusive.
///
/// ## Examples
///
/// ```
/// use bazaar_core::Rating;
///
/// let rating = Rating::new(4.5).unwrap();
/// assert_eq!(rating.stars(), "★★★★★");
///
/// assert!(Rating::new(5.5).is_err());
/// assert!(Rating::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(f32);

impl Rating {
    /// Highest possible rating.
    pub const MAX: f32 = 5.0;

    /// Create a rating, rejecting values outside `0..=5`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite or out of range.
    pub fn new(value: f32) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(0.0..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Render as five glyphs, filled stars first, rounding half up.
    #[must_use]
    pub fn stars(self) -> String {
        // Range is validated in `new`, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = self.0.round().clamp(0.0, Self::MAX) as usize;
        let empty = 5 - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl TryFrom<f32> for Rating {
    type Error = RatingError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
