//! Column Profiling Library
//!
//! Profiles a tabular dataset column by column, built with Rust and Polars.
//!
//! # Overview
//!
//! For every column of a table the library:
//!
//! - **Infers a semantic type**: integer, float, currency, string, or unknown,
//!   by running a fixed priority list of parse checks over the raw values
//! - **Cleans currency text**: strips currency symbols, codes and thousands
//!   separators so currency columns can be treated as numbers
//! - **Summarizes the distribution**: exact value counts for string and
//!   low-cardinality columns, ten equal-width frequency bins otherwise
//! - **Reports missing values**: always as their own row, never dropped
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_profiling::{ProfileConfig, SortBy, SummaryWriter, TableProfiler, load_table};
//!
//! let df = load_table("sales.csv")?;
//!
//! let config = ProfileConfig::builder()
//!     .sort_by(SortBy::Value)
//!     .normalize(true)
//!     .build()?;
//!
//! let report = TableProfiler::new(config.clone()).profile(&df)?;
//! for (column, summary) in report.iter() {
//!     println!("{}: {} rows", column, summary.len());
//! }
//!
//! SummaryWriter::from_config(&config).write(&report, "profiled_sales.csv".as_ref())?;
//! ```
//!
//! # Summaries
//!
//! Each [`SummaryTable`] has two columns: a label column (the distinct value,
//! or a bin range such as `"1,000 to <2,000"`) and a measure column named
//! `pct|{column}` (fractions of the row count) or `count|{column}`.
//! The missing-value row has no label.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod io;
pub mod profiler;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{clean_currency, clean_currency_value};
pub use config::{ConfigValidationError, ProfileConfig, ProfileConfigBuilder, SortBy};
pub use error::{ProfilingError, Result as ProfilingResult, ResultExt};
pub use io::{InputFormat, SummaryWriter, load_table, output_path};
pub use profiler::{
    BinnedSummary, TableProfiler, bin_column, classify_column, profile_table,
    profile_table_lenient, summarize_column,
};
pub use types::{
    ColumnData, ColumnFailure, ColumnProfile, ColumnType, Measure, ProfileReport, SummaryMode,
    SummaryRow, SummaryTable,
};
pub use utils::format_thousands;
