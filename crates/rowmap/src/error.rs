//! Error types for the row mapping library.

use thiserror::Error;

use crate::core::value::DataType;

/// Main error type for loader operations.
///
/// Schema mismatches never surface here: unmatched fields, members and
/// mapping entries are dropped during link resolution, and per-member
/// coercion failures are reported as [`AssignError`] warnings instead.
#[derive(Error, Debug)]
pub enum RowMapError {
    /// Configuration error (invalid mapping file, empty names, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The underlying record source failed
    #[error("Cursor error: {0}")]
    Cursor(String),

    /// A cell was read while the cursor was not positioned on a row
    #[error("Cursor is not positioned on a row - call advance() first")]
    NoCurrentRow,

    /// Ordinal outside the cursor's column range
    #[error("Ordinal {ordinal} is out of range for a cursor with {count} columns")]
    OrdinalOutOfRange { ordinal: usize, count: usize },

    /// A typed accessor could not produce the requested type
    #[error("Column {ordinal}: cannot read {found:?} as {expected:?}")]
    TypeMismatch {
        ordinal: usize,
        expected: DataType,
        found: DataType,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RowMapError {
    /// Create a Cursor error from any displayable source failure.
    pub fn cursor(message: impl Into<String>) -> Self {
        RowMapError::Cursor(message.into())
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, RowMapError>;

/// Why a single value could not be written to a member.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum AssignError {
    /// The value's type cannot be coerced into the member's type.
    #[error("expected {expected:?}, found {found:?}")]
    TypeMismatch { expected: DataType, found: DataType },

    /// The record does not recognise the member name.
    #[error("record has no writable member named '{0}'")]
    UnknownMember(String),
}

impl AssignError {
    /// Create a TypeMismatch error.
    pub fn mismatch(expected: DataType, found: DataType) -> Self {
        AssignError::TypeMismatch { expected, found }
    }
}
