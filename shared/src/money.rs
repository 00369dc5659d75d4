//! Money parsing and formatting using rust_decimal for precision
//!
//! The back office hands amounts over as display strings. Every such field
//! crosses [`parse_amount`] exactly once before arithmetic; a malformed value
//! fails the whole print with an error naming the field, instead of being
//! cast blindly.

use std::str::FromStr;

use rust_decimal::prelude::*;
use thiserror::Error;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Money boundary errors
#[derive(Debug, Clone, Error)]
pub enum MoneyError {
    #[error("Field '{field}' is not a valid amount: '{value}'")]
    Invalid { field: String, value: String },
}

/// Result type for money operations
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Parse a back-office amount string into a `Decimal`
///
/// `field` names the offending field in the error. Surrounding whitespace is
/// tolerated; anything else must be a plain decimal number.
pub fn parse_amount(field: &str, raw: &str) -> MoneyResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| MoneyError::Invalid {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Format a monetary value with two decimal places
pub fn format_amount(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    )
}
