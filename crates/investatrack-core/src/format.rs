//! Display formatting for amounts and dates
//!
//! Values from the backend are opaque except for these two transforms.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use investatrack_utils::group_thousands;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Colour family of a rendered value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// A signed amount ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAmount {
    pub text: String,
    pub tone: Tone,
}

/// Format an amount as US currency: `1234.5` -> `$1,234.50`
pub fn format_currency(amount: Decimal) -> String {
    format_currency_with(amount, DEFAULT_CURRENCY_SYMBOL)
}

pub fn format_currency_with(amount: Decimal, symbol: &str) -> String {
    let magnitude = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", magnitude);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, group_thousands(int_part), frac_part)
}

/// Gain/loss presentation.
///
/// Negative values carry a leading `-` and the error tone, positive values a
/// leading `+` and the success tone. Exactly zero gets no sign and the
/// success tone.
pub fn gain_loss(amount: Decimal, symbol: &str) -> SignedAmount {
    let body = format_currency_with(amount, symbol);
    if amount.is_sign_negative() && !amount.is_zero() {
        SignedAmount { text: body, tone: Tone::Error }
    } else if amount.is_zero() {
        SignedAmount { text: body, tone: Tone::Success }
    } else {
        SignedAmount { text: format!("+{}", body), tone: Tone::Success }
    }
}

/// Format a backend timestamp as a calendar date.
///
/// Accepts ISO local date-times (with or without fraction), RFC 3339 and
/// bare dates. Anything else is returned unchanged.
pub fn format_date(raw: &str, format: &str) -> String {
    let trimmed = raw.trim();
    let date = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));

    match date {
        Ok(date) => {
            let mut out = String::new();
            // Invalid format strings surface as a fmt error instead of a panic
            if write!(out, "{}", date.format(format)).is_err() {
                return raw.to_string();
            }
            out
        }
        Err(_) => raw.to_string(),
    }
}
