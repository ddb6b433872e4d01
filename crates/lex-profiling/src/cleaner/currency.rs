//! Currency text cleaning and numeric coercion.

use crate::error::{ProfilingError, Result};
use crate::types::ColumnType;
use crate::utils::parse_float;

/// Substrings stripped from currency text, applied in this order.
pub const CURRENCY_TOKENS: [&str; 10] = ["$", "€", "£", "USD", "GBP", "EUR", "¥", "₣", "₹", ","];

/// Strip every currency token from a single value.
///
/// Literal substring removal only; the result is not validated.
pub fn clean_currency_value(value: &str) -> String {
    let mut result = value.to_string();
    for token in CURRENCY_TOKENS {
        if result.contains(token) {
            result = result.replace(token, "");
        }
    }
    result
}

/// Strip currency tokens from every value, leaving missing cells missing.
///
/// Returns a new sequence; the input is untouched.
pub fn clean_currency(values: &[Option<String>]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|v| v.as_deref().map(clean_currency_value))
        .collect()
}

/// Clean and parse currency text into numbers.
///
/// The first value that still fails to parse after cleaning aborts with
/// [`ProfilingError::DataTypeMismatch`] naming the column and the raw value.
pub fn coerce_currency(column: &str, values: &[Option<String>]) -> Result<Vec<Option<f64>>> {
    values
        .iter()
        .map(|v| match v {
            None => Ok(None),
            Some(raw) => parse_float(&clean_currency_value(raw))
                .map(Some)
                .ok_or_else(|| mismatch(column, raw, ColumnType::Currency)),
        })
        .collect()
}

/// Parse plain numeric text, without any currency cleaning.
pub fn coerce_numeric(
    column: &str,
    values: &[Option<String>],
    expected: ColumnType,
) -> Result<Vec<Option<f64>>> {
    values
        .iter()
        .map(|v| match v {
            None => Ok(None),
            Some(raw) => parse_float(raw)
                .map(Some)
                .ok_or_else(|| mismatch(column, raw, expected)),
        })
        .collect()
}

fn mismatch(column: &str, value: &str, expected: ColumnType) -> ProfilingError {
    ProfilingError::DataTypeMismatch {
        column: column.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}
