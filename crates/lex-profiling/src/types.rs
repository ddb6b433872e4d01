use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Currency,
    String,
    Unknown,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Currency => "currency",
            ColumnType::String => "string",
            ColumnType::Unknown => "unknown",
        }
    }

    /// Whether summarization treats the column as numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer | ColumnType::Float | ColumnType::Currency
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Owned working copy of one column: raw cell text, `None` for missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnData {
    pub name: String,
    pub values: Vec<Option<String>>,
}

impl ColumnData {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a column from string slices; `None` marks a missing cell.
    pub fn from_strs(name: impl Into<String>, values: &[Option<&str>]) -> Self {
        Self::new(
            name,
            values.iter().map(|v| v.map(str::to_string)).collect(),
        )
    }

    /// Copy a polars column into raw text, whatever its dtype.
    pub fn from_column(column: &Column) -> Result<Self> {
        let series = column.as_materialized_series();
        let text = series.cast(&DataType::String)?;
        let values = text
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();

        Ok(Self {
            name: series.name().to_string(),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Iterate over the present (non-missing) values.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.values.iter().flatten().map(String::as_str)
    }
}

/// How a column was tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    /// One row per distinct value plus the missing row.
    ValueCounts,
    /// Missing row followed by ten equal-width bins.
    Binned,
}

/// A count, or a fraction of the column's row count when normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Count(u64),
    Fraction(f64),
}

impl Measure {
    /// Build a measure from a raw count, normalizing over `total` rows if asked.
    pub fn from_count(count: u64, total: usize, normalize: bool) -> Self {
        if !normalize {
            Measure::Count(count)
        } else if total == 0 {
            Measure::Fraction(0.0)
        } else {
            Measure::Fraction(count as f64 / total as f64)
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Measure::Count(c) => c as f64,
            Measure::Fraction(f) => f,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Count(c) => write!(f, "{}", c),
            Measure::Fraction(v) => write!(f, "{}", v),
        }
    }
}

/// One row of a summary table. A `None` label is the missing-value row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: Option<String>,
    pub measure: Measure,
}

impl SummaryRow {
    pub fn is_missing(&self) -> bool {
        self.label.is_none()
    }
}

/// Two-column summary of a single column's distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Header of the label column: the column name, or `bins|{name}` when binned.
    pub label_column: String,
    /// Header of the measure column: `pct|{name}` or `count|{name}`.
    pub measure_column: String,
    pub mode: SummaryMode,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Measure of the missing-value row, if the table has one.
    pub fn missing(&self) -> Option<Measure> {
        self.rows.iter().find(|r| r.is_missing()).map(|r| r.measure)
    }

    /// Measure of the row with the given label.
    pub fn get(&self, label: &str) -> Option<Measure> {
        self.rows
            .iter()
            .find(|r| r.label.as_deref() == Some(label))
            .map(|r| r.measure)
    }

    /// Labels of the non-missing rows, in row order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().filter_map(|r| r.label.as_deref()).collect()
    }

    /// Sum of every row's measure, the missing row included.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.measure.as_f64()).sum()
    }

    /// Convert into a two-column polars frame.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let labels: Vec<Option<String>> = self.rows.iter().map(|r| r.label.clone()).collect();
        let label_series = Series::new(self.label_column.as_str().into(), labels);

        let measure_series = if self.is_normalized() {
            let values: Vec<f64> = self.rows.iter().map(|r| r.measure.as_f64()).collect();
            Series::new(self.measure_column.as_str().into(), values)
        } else {
            let values: Vec<u64> = self
                .rows
                .iter()
                .map(|r| match r.measure {
                    Measure::Count(c) => c,
                    Measure::Fraction(f) => f as u64,
                })
                .collect();
            Series::new(self.measure_column.as_str().into(), values)
        };

        Ok(DataFrame::new(vec![label_series.into(), measure_series.into()])?)
    }

    fn is_normalized(&self) -> bool {
        self.measure_column.starts_with("pct|")
    }
}

/// Type and summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    pub row_count: usize,
    pub missing_count: usize,
    pub summary: SummaryTable,
}

/// A column whose summarization failed in lenient profiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFailure {
    pub column: String,
    pub code: String,
    pub message: String,
}

/// Per-column profiles in table column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub columns: Vec<ColumnProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ColumnFailure>,
}

impl ProfileReport {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Profile of the named column.
    pub fn get(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Summary table of the named column.
    pub fn summary(&self, name: &str) -> Option<&SummaryTable> {
        self.get(name).map(|c| &c.summary)
    }

    /// Column names in profile order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate `(column name, summary)` pairs in profile order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryTable)> {
        self.columns.iter().map(|c| (c.name.as_str(), &c.summary))
    }
}
