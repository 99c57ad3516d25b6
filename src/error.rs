// Error types for the library modules.
// The binary and the UI layer wrap these in `anyhow::Error`; the library
// keeps them typed so callers can tell a duplicate apart from an I/O fault.

use thiserror::Error;

/// Rejected user input. The `Display` text is shown to the operator as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid name. Use letters and common punctuation (2-70 chars).")]
    Name,
    #[error("Invalid department name.")]
    Department,
    #[error("Invalid position.")]
    Position,
    #[error("Salary must be a non-negative integer (commas allowed).")]
    Salary,
    #[error("Invalid ID.")]
    Id,
    #[error("No IDs provided.")]
    NoIds,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Employee '{name}' already exists in '{department}'.")]
    Duplicate { name: String, department: String },
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not prepare database location: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored admin credentials are corrupt")]
    CorruptCredentials,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
