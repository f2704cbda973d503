//! Custom error types for the adt-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum AdtError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The file ends before the fixed-size header does.
    #[error("Truncated header: expected {expected} bytes, but found {found} bytes")]
    TruncatedHeader { expected: usize, found: usize },

    /// A column descriptor slot announced by the header could not be read in full.
    #[error("Truncated column descriptor in slot {slot} at offset {offset}")]
    TruncatedColumns { slot: usize, offset: u64 },

    /// A column was declared with a zero byte width.
    #[error("Invalid length for column '{name}': field length must be greater than 0")]
    InvalidColumnLength { name: String },

    /// A column name was empty once non-printable characters were stripped.
    #[error("Invalid column name: column name cannot be empty")]
    EmptyColumnName,

    /// A record index outside of `0..record_count` was requested.
    #[error("Record index {index} out of bounds (table has {count} records)")]
    RecordIndexOutOfBounds { index: u32, count: u32 },

    /// The file ends inside a row announced by the header.
    #[error("Incomplete row {index}: expected {expected} bytes, but found {found} bytes")]
    IncompleteRow {
        index: u32,
        expected: usize,
        found: usize,
    },

    /// The row bytes ran out before every column was decoded.
    #[error("Truncated record: column '{column}' needs {expected} bytes, but only {found} remain")]
    TruncatedRecord {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A fixed-width column is declared narrower than its wire width.
    #[error("Column '{column}' is {length} bytes wide, but its type needs {width}")]
    FieldTooShort {
        column: String,
        length: usize,
        width: usize,
    },

    /// The column type has no generic fixed-width decoding rule.
    #[error("Unsupported column type {type_name} for column '{column}'")]
    UnsupportedType { column: String, type_name: String },

    /// A mutex lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A mutex lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

impl AdtError {
    /// Returns `true` for errors that prevent a table from being loaded at all.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AdtError::TruncatedHeader { .. }
                | AdtError::TruncatedColumns { .. }
                | AdtError::InvalidColumnLength { .. }
                | AdtError::EmptyColumnName
        )
    }

    /// Returns `true` for errors confined to a single record.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            AdtError::IncompleteRow { .. }
                | AdtError::TruncatedRecord { .. }
                | AdtError::FieldTooShort { .. }
                | AdtError::UnsupportedType { .. }
        )
    }
}

/// A convenience `Result` type alias using the crate's `AdtError` type.
pub type Result<T> = std::result::Result<T, AdtError>;
