//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are never held in binary floats. Amounts coming from persisted
//! cart data may be numbers or human-formatted strings (`"Rs. 1,500"`), so
//! this module also owns the lenient coercion used when reading those.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paisa).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Fraction digits shown by [`Price::display`] at most.
    pub const MAX_DISPLAY_FRACTION: u32 = 3;

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display with grouped thousands and no padded fraction,
    /// e.g. `"Rs. 10,500"` or `"Rs. 1,234.5"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{}",
            self.currency_code.symbol(),
            format_amount(self.amount, 0, Self::MAX_DISPLAY_FRACTION)
        )
    }

    /// Format for display with exactly two fraction digits,
    /// e.g. `"Rs. 10,500.00"`.
    #[must_use]
    pub fn display_fixed(&self) -> String {
        format!(
            "{}{}",
            self.currency_code.symbol(),
            format_amount(self.amount, 2, 2)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Error returned when parsing an unsupported currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    PKR,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display prefix, including any separating space.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::PKR => "Rs. ",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PKR => "PKR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PKR" => Ok(Self::PKR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(UnknownCurrency(s.to_owned())),
        }
    }
}

/// Format an amount with comma-grouped thousands.
///
/// The amount is rounded half away from zero to `max_fraction` digits,
/// trailing zeros are trimmed, then the fraction is padded back to at least
/// `min_fraction` digits.
#[must_use]
pub fn format_amount(amount: Decimal, min_fraction: u32, max_fraction: u32) -> String {
    let rounded = amount
        .round_dp_with_strategy(max_fraction, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));

    let min = usize::try_from(min_fraction).unwrap_or(usize::MAX);
    if !frac_part.is_empty() || min > 0 {
        out.push('.');
        out.push_str(frac_part);
        for _ in frac_part.len()..min {
            out.push('0');
        }
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Coerce a stored JSON price into a numeric amount.
///
/// Numbers are taken as-is, strings go through [`parse_amount_lenient`],
/// anything else becomes zero.
#[must_use]
pub fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .unwrap_or(Decimal::ZERO)
        }
        Value::String(s) => parse_amount_lenient(s),
        _ => Decimal::ZERO,
    }
}

/// Parse a human-formatted amount such as `"Rs. 1,500"` or `"$19.99"`.
///
/// Leading text up to the first digit is skipped (a `.` only starts the
/// number when a digit follows it), every other character that is not a
/// digit or `.` is dropped, and the longest prefix with at most one decimal
/// point is parsed. Unparsable input yields zero.
#[must_use]
pub fn parse_amount_lenient(raw: &str) -> Decimal {
    let chars: Vec<char> = raw.chars().collect();
    let start = chars.iter().enumerate().position(|(i, c)| {
        c.is_ascii_digit() || (*c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit))
    });
    let Some(start) = start else {
        return Decimal::ZERO;
    };

    let mut cleaned = String::new();
    let mut seen_point = false;
    for c in chars.iter().skip(start) {
        match c {
            '0'..='9' => cleaned.push(*c),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push('.');
            }
            '.' => break,
            _ => {}
        }
    }

    let cleaned = cleaned.trim_end_matches('.');
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(cleaned).unwrap_or(Decimal::ZERO)
}
