//! Configuration types for table profiling.
//!
//! This module provides configuration options using the builder pattern.
//! Only `sort_by` and `normalize` affect the summaries themselves; the
//! remaining options control where and how the side-by-side sheet is written.

use crate::error::ProfilingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Row ordering of exact-count summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Ascending by value (numeric order for numbers, byte order for text).
    #[default]
    Index,
    /// Descending by count, ties keep first-appearance order.
    Value,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Index => "index",
            SortBy::Value => "value",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" => Ok(SortBy::Index),
            "value" => Ok(SortBy::Value),
            other => Err(ConfigValidationError::InvalidSortBy(other.to_string())),
        }
    }
}

/// Configuration for a profiling run.
///
/// Use [`ProfileConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_profiling::config::{ProfileConfig, SortBy};
///
/// let config = ProfileConfig::builder()
///     .sort_by(SortBy::Value)
///     .normalize(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Row ordering of exact-count summaries.
    /// Default: Index
    pub sort_by: SortBy,

    /// Report fractions of the column's row count instead of raw counts.
    /// Default: true
    pub normalize: bool,

    /// Number of empty columns between side-by-side tables in the sheet.
    /// Default: 1
    pub spacer_columns: usize,

    /// Prefix of the written file name.
    /// Default: "profiled_"
    pub output_prefix: String,

    /// Directory of the written file. If None, the input's directory is used.
    /// Default: None
    pub output_dir: Option<PathBuf>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            sort_by: SortBy::default(),
            normalize: true,
            spacer_columns: 1,
            output_prefix: "profiled_".to_string(),
            output_dir: None,
        }
    }
}

impl ProfileConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfileConfigBuilder {
        ProfileConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.output_prefix.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputPrefix);
        }
        if self.output_prefix.contains(['/', '\\']) {
            return Err(ConfigValidationError::InvalidOutputPrefix(
                self.output_prefix.clone(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: ProfileConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_json_file(path: &Path) -> crate::error::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Prefix of the measure column: `pct` when normalized, `count` otherwise.
    pub fn measure_prefix(&self) -> &'static str {
        measure_prefix(self.normalize)
    }
}

/// Prefix of the measure column for the given normalization setting.
pub fn measure_prefix(normalize: bool) -> &'static str {
    if normalize { "pct" } else { "count" }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sort order '{0}' (expected 'index' or 'value')")]
    InvalidSortBy(String),

    #[error("Output prefix must not be empty")]
    EmptyOutputPrefix,

    #[error("Output prefix '{0}' must not contain path separators")]
    InvalidOutputPrefix(String),
}

impl From<ConfigValidationError> for ProfilingError {
    fn from(err: ConfigValidationError) -> Self {
        ProfilingError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ProfileConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfileConfigBuilder {
    sort_by: Option<SortBy>,
    normalize: Option<bool>,
    spacer_columns: Option<usize>,
    output_prefix: Option<String>,
    output_dir: Option<PathBuf>,
}

impl ProfileConfigBuilder {
    /// Set the row ordering of exact-count summaries.
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Report fractions (`true`) or raw counts (`false`).
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    /// Set the gap between side-by-side tables in the written sheet.
    pub fn spacer_columns(mut self, spacer: usize) -> Self {
        self.spacer_columns = Some(spacer);
        self
    }

    /// Set the prefix of the written file name.
    pub fn output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = Some(prefix.into());
        self
    }

    /// Set the directory the sheet is written to.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfileConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfileConfig, ConfigValidationError> {
        let config = ProfileConfig {
            sort_by: self.sort_by.unwrap_or_default(),
            normalize: self.normalize.unwrap_or(true),
            spacer_columns: self.spacer_columns.unwrap_or(1),
            output_prefix: self
                .output_prefix
                .unwrap_or_else(|| "profiled_".to_string()),
            output_dir: self.output_dir,
        };

        config.validate()?;
        Ok(config)
    }
}
