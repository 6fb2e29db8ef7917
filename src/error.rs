//! Error types with actionable diagnostics.
//!
//! Only structural failures surface here. Per-column, per-test problems
//! (missing columns, wrong column kinds, degenerate contingency tables) are
//! absorbed into the [`DriftReport`](crate::drift::DriftReport) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for driftwatch operations.
pub type Result<T> = std::result::Result<T, DriftError>;

/// Errors that can occur while building an engine or moving data in and out of it.
#[derive(Error, Debug)]
pub enum DriftError {
    /// Reference dataset has no rows or no columns.
    #[error("Reference dataset is empty ({rows} rows, {columns} columns)\n  → Provide at least one column with at least one row as the drift baseline")]
    EmptyReference { rows: usize, columns: usize },

    /// Dataset is structurally invalid (ragged columns, duplicate names).
    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue { field: String, message: String, suggestion: String },

    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Create a config file with `driftwatch config` or drop the --config flag")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV input could not be read.
    #[error("CSV error in {path}: {source}\n  → Check that the file has a header row and a consistent number of fields")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DriftError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a dataset validation error.
    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset { message: message.into() }
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyReference { .. }
                | Self::InvalidDataset { .. }
                | Self::ConfigValue { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::Csv { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyReference { .. } => "E001",
            Self::InvalidDataset { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::ConfigNotFound { .. } => "E004",
            Self::ConfigParsing { .. } => "E005",
            Self::Io { .. } => "E050",
            Self::Csv { .. } => "E051",
            Self::Serialization { .. } => "E052",
        }
    }
}

impl From<serde_json::Error> for DriftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { message: err.to_string() }
    }
}
