//! Type inference for column analysis.
//!
//! Classification runs a fixed, priority-ordered list of checks over the
//! column's present values. Each check is a pure predicate returning a
//! [`CheckOutcome`]; the first match wins. Every check sees the raw
//! values, never the output of an earlier check.

use crate::cleaner::clean_currency_value;
use crate::types::ColumnType;
use crate::utils::{parse_float, truncate_to_int};
use serde::Serialize;

/// Checks in the order they are tried.
pub const CHECK_ORDER: [ColumnType; 4] = [
    ColumnType::Integer,
    ColumnType::Float,
    ColumnType::Currency,
    ColumnType::String,
];

/// Why a check did not match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// A value did not parse (or did not cast to an integer).
    Unparseable { value: String },
    /// The truncated sum differs from the float sum.
    Fractional { int_sum: f64, float_sum: f64 },
    /// The float sum is zero or negative.
    NonPositiveSum { sum: f64 },
}

/// Result of a single classification check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CheckOutcome {
    Match,
    Rejected(Rejection),
}

impl CheckOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, CheckOutcome::Match)
    }
}

/// Classification result with the reason each earlier check was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub column_type: ColumnType,
    pub rejected: Vec<(ColumnType, Rejection)>,
}

/// Infer the semantic type of a column from its raw cell values.
///
/// Total: every column receives a type. Missing cells are ignored; a column
/// without present values is `Unknown`.
pub fn classify_column(values: &[Option<String>]) -> ColumnType {
    classify_column_traced(values).column_type
}

/// Same as [`classify_column`], keeping the rejection reasons.
pub fn classify_column_traced(values: &[Option<String>]) -> Classification {
    let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
    let mut rejected = Vec::new();

    if present.is_empty() {
        return Classification {
            column_type: ColumnType::Unknown,
            rejected,
        };
    }

    for candidate in CHECK_ORDER {
        match run_check(candidate, &present) {
            CheckOutcome::Match => {
                return Classification {
                    column_type: candidate,
                    rejected,
                };
            }
            CheckOutcome::Rejected(reason) => rejected.push((candidate, reason)),
        }
    }

    Classification {
        column_type: ColumnType::Unknown,
        rejected,
    }
}

/// Run the check for one candidate type.
pub fn run_check(candidate: ColumnType, present: &[&str]) -> CheckOutcome {
    match candidate {
        ColumnType::Integer => check_integer(present),
        ColumnType::Float => check_float(present),
        ColumnType::Currency => check_currency(present),
        ColumnType::String => check_string(present),
        ColumnType::Unknown => CheckOutcome::Match,
    }
}

/// Whole numbers only: the truncated sum must equal the float sum.
pub fn check_integer(present: &[&str]) -> CheckOutcome {
    let mut int_sum: i128 = 0;
    let mut float_sum = 0.0_f64;

    for value in present {
        let Some(parsed) = parse_float(value) else {
            return unparseable(value);
        };
        let Some(truncated) = truncate_to_int(parsed) else {
            return unparseable(value);
        };
        int_sum += i128::from(truncated);
        float_sum += parsed;
    }

    let int_sum = int_sum as f64;
    if int_sum == float_sum {
        CheckOutcome::Match
    } else {
        CheckOutcome::Rejected(Rejection::Fractional { int_sum, float_sum })
    }
}

/// Every value parses as a float and the sum is strictly positive.
///
/// NaN values are left out of the sum.
pub fn check_float(present: &[&str]) -> CheckOutcome {
    let mut sum = 0.0_f64;

    for value in present {
        let Some(parsed) = parse_float(value) else {
            return unparseable(value);
        };
        if !parsed.is_nan() {
            sum += parsed;
        }
    }

    if sum > 0.0 {
        CheckOutcome::Match
    } else {
        CheckOutcome::Rejected(Rejection::NonPositiveSum { sum })
    }
}

/// Every value parses once currency tokens are stripped.
pub fn check_currency(present: &[&str]) -> CheckOutcome {
    match present
        .iter()
        .find(|value| parse_float(&clean_currency_value(value)).is_none())
    {
        Some(value) => unparseable(value),
        None => CheckOutcome::Match,
    }
}

/// Present values are already text.
pub fn check_string(_present: &[&str]) -> CheckOutcome {
    CheckOutcome::Match
}

fn unparseable(value: &str) -> CheckOutcome {
    CheckOutcome::Rejected(Rejection::Unparseable {
        value: value.to_string(),
    })
}
