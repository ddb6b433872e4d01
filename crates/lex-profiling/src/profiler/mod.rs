//! Table profiling: per-column type inference and summarization.
//!
//! This module provides functionality for:
//! - Type inference for columns (integer, float, currency, string, unknown)
//! - Equal-width frequency binning of numeric columns
//! - Exact value counts for string and low-cardinality columns
//! - Profiling every column of a table into an ordered report

mod binning;
mod summarizer;
mod type_inference;

pub use binning::{BIN_COUNT, Bin, BinnedSummary, bin_column, bin_label};
pub use summarizer::{LOW_CARDINALITY_LIMIT, summarize_column};
pub use type_inference::{
    CHECK_ORDER, CheckOutcome, Classification, Rejection, classify_column,
    classify_column_traced,
};

use crate::config::{ProfileConfig, SortBy};
use crate::error::{ProfilingError, Result, ResultExt};
use crate::types::{ColumnData, ColumnFailure, ColumnProfile, ColumnType, ProfileReport};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Table profiler: classifies and summarizes every column of a table.
///
/// The profiler copies each column out of the frame before working on it,
/// so the caller's table is never modified.
#[derive(Debug, Clone, Default)]
pub struct TableProfiler {
    config: ProfileConfig,
}

impl TableProfiler {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Profile every column of a frame, in column order.
    ///
    /// The first column that fails to summarize aborts the run with its error.
    pub fn profile(&self, df: &DataFrame) -> Result<ProfileReport> {
        self.profile_columns(extract_columns(df)?)
    }

    /// Profile every column, recording failing columns instead of aborting.
    ///
    /// Columns that summarize successfully are unaffected by failing ones.
    pub fn profile_lenient(&self, df: &DataFrame) -> Result<ProfileReport> {
        let columns = extract_columns(df)?;
        let mut report = ProfileReport::default();

        info!("Profiling {} columns (lenient)", columns.len());
        for column in &columns {
            match self.profile_column(column) {
                Ok(profile) => report.columns.push(profile),
                Err(e) => {
                    warn!("Skipping column '{}': {}", column.name, e);
                    report.failures.push(ColumnFailure {
                        column: column.name.clone(),
                        code: e.error_code().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Profile already-extracted columns, in the given order.
    pub fn profile_columns(&self, columns: Vec<ColumnData>) -> Result<ProfileReport> {
        info!(
            "Profiling {} columns (sort_by={}, normalize={})",
            columns.len(),
            self.config.sort_by,
            self.config.normalize
        );

        let columns = columns
            .iter()
            .map(|column| self.profile_column(column))
            .collect::<Result<Vec<_>>>()
            .context("Failed to profile table")?;

        info!("Profiled {} columns", columns.len());
        Ok(ProfileReport {
            columns,
            failures: Vec::new(),
        })
    }

    /// Classify and summarize a single column.
    pub fn profile_column(&self, column: &ColumnData) -> Result<ColumnProfile> {
        let classification = classify_column_traced(&column.values);
        let column_type = classification.column_type;
        debug!(
            "Column '{}' classified as {} ({} checks rejected)",
            column.name,
            column_type,
            classification.rejected.len()
        );

        // Unknown columns are summarized like strings
        let summary_type = match column_type {
            ColumnType::Unknown => ColumnType::String,
            other => other,
        };
        let summary = summarize_column(
            column,
            summary_type,
            self.config.normalize,
            self.config.sort_by,
        )?;

        Ok(ColumnProfile {
            name: column.name.clone(),
            column_type,
            row_count: column.len(),
            missing_count: column.missing_count(),
            summary,
        })
    }
}

/// Profile a frame with explicit `sort_by` / `normalize` and default output settings.
pub fn profile_table(df: &DataFrame, sort_by: SortBy, normalize: bool) -> Result<ProfileReport> {
    let config = ProfileConfig {
        sort_by,
        normalize,
        ..ProfileConfig::default()
    };
    TableProfiler::new(config).profile(df)
}

/// Like [`profile_table`], but failing columns are listed in the report instead of aborting.
pub fn profile_table_lenient(
    df: &DataFrame,
    sort_by: SortBy,
    normalize: bool,
) -> Result<ProfileReport> {
    let config = ProfileConfig {
        sort_by,
        normalize,
        ..ProfileConfig::default()
    };
    TableProfiler::new(config).profile_lenient(df)
}

/// Copy every column of a frame into owned text columns.
pub fn extract_columns(df: &DataFrame) -> Result<Vec<ColumnData>> {
    df.get_columns()
        .iter()
        .map(|column| {
            ColumnData::from_column(column)
                .context(format!("Failed to read column '{}'", column.name()))
        })
        .collect()
}

/// Copy a single named column into owned text.
pub fn extract_column(df: &DataFrame, name: &str) -> Result<ColumnData> {
    let column = df
        .column(name)
        .map_err(|_| ProfilingError::ColumnNotFound(name.to_string()))?;
    ColumnData::from_column(column)
}
