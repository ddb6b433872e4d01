//! Value cleaning for profiling.
//!
//! This module provides:
//! - Currency text cleaning (symbol, code and thousands-separator stripping)
//! - Numeric coercion of cleaned or plain numeric text

mod currency;

pub use currency::{
    CURRENCY_TOKENS, clean_currency, clean_currency_value, coerce_currency, coerce_numeric,
};
