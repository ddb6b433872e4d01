//! Custom error types for the profiling engine.
//!
//! This module provides the error hierarchy using `thiserror`. Classification
//! never produces errors; the variants below cover data-integrity failures
//! during summarization and the I/O done by the loader and writer.
//!
//! Errors are serializable so that a report consumer (e.g. `--json` output)
//! can carry them as `{code, message}` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the profiling engine.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// A value in a declared numeric or currency column could not be parsed.
    #[error("Column '{column}' declared {expected} but value '{value}' is not numeric")]
    DataTypeMismatch {
        column: String,
        value: String,
        expected: String,
    },

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input file type cannot be read.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Neither tab nor comma produced a usable table.
    #[error("Could not detect delimiter for '{0}'")]
    DelimiterDetection(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Workbook could not be opened or read.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilingError>,
    },
}

impl ProfilingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, independent of the message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataTypeMismatch { .. } => "DATA_TYPE_MISMATCH",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::DelimiterDetection(_) => "DELIMITER_DETECTION",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Spreadsheet(_) => "SPREADSHEET_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Name of the column the error is about, when there is one.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::DataTypeMismatch { column, .. } => Some(column),
            Self::ColumnNotFound(column) => Some(column),
            Self::WithContext { source, .. } => source.column(),
            _ => None,
        }
    }

    /// Check if this error is a data-integrity failure in a single column.
    pub fn is_data_mismatch(&self) -> bool {
        match self {
            Self::DataTypeMismatch { .. } => true,
            Self::WithContext { source, .. } => source.is_data_mismatch(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ProfilingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfilingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilingError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch() -> ProfilingError {
        ProfilingError::DataTypeMismatch {
            column: "price".to_string(),
            value: "n/a".to_string(),
            expected: "currency".to_string(),
        }
    }

    #[test]
    fn test_error_code() {
        assert_eq!(mismatch().error_code(), "DATA_TYPE_MISMATCH");
        assert_eq!(
            ProfilingError::ColumnNotFound("test".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_mismatch_names_column_and_value() {
        let error = mismatch();
        let message = error.to_string();
        assert!(message.contains("price"));
        assert!(message.contains("n/a"));
        assert_eq!(error.column(), Some("price"));
        assert!(error.is_data_mismatch());
    }

    #[test]
    fn test_error_serialization() {
        let json = serde_json::to_string(&mismatch()).unwrap();
        assert!(json.contains("DATA_TYPE_MISMATCH"));
        assert!(json.contains("price"));
    }

    #[test]
    fn test_with_context() {
        let error = mismatch().with_context("Summarizing table");
        assert!(error.to_string().contains("Summarizing table"));
        // Code and column survive the wrapping
        assert_eq!(error.error_code(), "DATA_TYPE_MISMATCH");
        assert_eq!(error.column(), Some("price"));
        assert!(error.is_data_mismatch());
    }

    #[test]
    fn test_io_is_not_mismatch() {
        let error = ProfilingError::Io(std::io::Error::other("disk"));
        assert!(!error.is_data_mismatch());
        assert_eq!(error.column(), None);
    }
}
