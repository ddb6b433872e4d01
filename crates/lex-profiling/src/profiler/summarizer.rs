//! Per-column summarization: exact value counts or frequency bins.

use super::binning::bin_column;
use crate::cleaner::{coerce_currency, coerce_numeric};
use crate::config::{SortBy, measure_prefix};
use crate::error::Result;
use crate::types::{ColumnData, ColumnType, Measure, SummaryMode, SummaryRow, SummaryTable};
use crate::utils::format_value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Numeric columns with fewer distinct present values are counted exactly.
pub const LOW_CARDINALITY_LIMIT: usize = 10;

/// Grouping key of a cell. Numbers are keyed by the bits of their value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Missing,
    Number(u64),
    Text(String),
}

impl GroupKey {
    fn number(value: f64) -> Self {
        // -0.0 and 0.0 are the same value
        let value = if value == 0.0 { 0.0 } else { value };
        GroupKey::Number(value.to_bits())
    }

    fn label(self) -> Option<String> {
        match self {
            GroupKey::Missing => None,
            GroupKey::Number(bits) => Some(format_value(f64::from_bits(bits))),
            GroupKey::Text(text) => Some(text),
        }
    }
}

/// Column values after type-driven coercion; the caller's column is untouched.
enum WorkingValues {
    Numbers(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl WorkingValues {
    fn prepare(column: &ColumnData, column_type: ColumnType) -> Result<Self> {
        let numbers = match column_type {
            ColumnType::Currency => coerce_currency(&column.name, &column.values)?,
            ColumnType::Integer | ColumnType::Float => {
                coerce_numeric(&column.name, &column.values, column_type)?
            }
            ColumnType::String | ColumnType::Unknown => {
                return Ok(WorkingValues::Text(column.values.clone()));
            }
        };

        // NaN is a missing value, not a distinct number
        Ok(WorkingValues::Numbers(
            numbers
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect(),
        ))
    }

    fn keys(&self) -> Vec<GroupKey> {
        match self {
            WorkingValues::Numbers(values) => values
                .iter()
                .map(|v| v.map_or(GroupKey::Missing, GroupKey::number))
                .collect(),
            WorkingValues::Text(values) => values
                .iter()
                .map(|v| {
                    v.as_ref()
                        .map_or(GroupKey::Missing, |s| GroupKey::Text(s.clone()))
                })
                .collect(),
        }
    }
}

/// Summarize one column given its inferred type.
///
/// String and unknown columns, and numeric columns with fewer than
/// [`LOW_CARDINALITY_LIMIT`] distinct present values, get exact value counts
/// (missing included as its own row). Other numeric columns are binned, and
/// infinite values there are reported in the missing row.
/// Currency columns are cleaned into numbers first; a value that still does
/// not parse aborts with `DataTypeMismatch`.
pub fn summarize_column(
    column: &ColumnData,
    column_type: ColumnType,
    normalize: bool,
    sort_by: SortBy,
) -> Result<SummaryTable> {
    let working = WorkingValues::prepare(column, column_type)?;
    let keys = working.keys();
    let distinct = distinct_present(&keys);
    let exact = !column_type.is_numeric() || distinct < LOW_CARDINALITY_LIMIT;

    debug!(
        "Column '{}': type={}, distinct={}, mode={}",
        column.name,
        column_type,
        distinct,
        if exact { "value_counts" } else { "binned" }
    );

    match working {
        WorkingValues::Numbers(values) if !exact => {
            Ok(bin_column(&values, normalize).into_table(&column.name))
        }
        _ => Ok(count_values(&column.name, keys, normalize, sort_by)),
    }
}

fn distinct_present(keys: &[GroupKey]) -> usize {
    keys.iter()
        .filter(|k| **k != GroupKey::Missing)
        .collect::<HashSet<_>>()
        .len()
}

/// Exact counts per distinct key, in first-appearance order before sorting.
fn count_values(
    column: &str,
    keys: Vec<GroupKey>,
    normalize: bool,
    sort_by: SortBy,
) -> SummaryTable {
    let total = keys.len();
    let mut groups: Vec<(GroupKey, u64)> = Vec::new();
    let mut positions: HashMap<GroupKey, usize> = HashMap::new();

    for key in keys {
        match positions.get(&key) {
            Some(&pos) => groups[pos].1 += 1,
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, 1));
            }
        }
    }

    // The missing bucket is always reported, even when empty
    if !positions.contains_key(&GroupKey::Missing) {
        groups.push((GroupKey::Missing, 0));
    }

    match sort_by {
        SortBy::Index => groups.sort_by(|a, b| compare_keys(&a.0, &b.0)),
        SortBy::Value => groups.sort_by(|a, b| b.1.cmp(&a.1)),
    }

    SummaryTable {
        label_column: column.to_string(),
        measure_column: format!("{}|{}", measure_prefix(normalize), column),
        mode: SummaryMode::ValueCounts,
        rows: groups
            .into_iter()
            .map(|(key, count)| SummaryRow {
                label: key.label(),
                measure: Measure::from_count(count, total, normalize),
            })
            .collect(),
    }
}

/// Ascending value order; the missing bucket sorts last.
fn compare_keys(a: &GroupKey, b: &GroupKey) -> Ordering {
    match (a, b) {
        (GroupKey::Missing, GroupKey::Missing) => Ordering::Equal,
        (GroupKey::Missing, _) => Ordering::Greater,
        (_, GroupKey::Missing) => Ordering::Less,
        (GroupKey::Number(x), GroupKey::Number(y)) => {
            f64::from_bits(*x).total_cmp(&f64::from_bits(*y))
        }
        (GroupKey::Text(x), GroupKey::Text(y)) => x.cmp(y),
        (GroupKey::Number(_), GroupKey::Text(_)) => Ordering::Less,
        (GroupKey::Text(_), GroupKey::Number(_)) => Ordering::Greater,
    }
}
