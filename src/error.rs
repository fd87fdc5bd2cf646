//! Error types for LiteDB
//!
//! This module defines all error types used throughout the database engine.

use thiserror::Error;

/// The main error type for LiteDB
#[derive(Error, Debug)]
pub enum Error {
    // ========== Lexer Errors ==========
    #[error("Lexer error: unexpected character '{0}' at position {1}")]
    UnexpectedCharacter(char, usize),

    #[error("Lexer error: unterminated string literal starting at position {0}")]
    UnterminatedString(usize),

    // ========== Parser Errors ==========
    #[error("Parse error: unexpected token '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    #[error("Parse error: unknown column type '{0}'")]
    UnknownType(String),

    // ========== Catalog Errors ==========
    #[error("Table {0} not found.")]
    TableNotFound(String),

    #[error("Table '{0}' already exists.")]
    TableAlreadyExists(String),

    #[error("Column '{0}' not found in table '{1}'")]
    ColumnNotFound(String, String),

    #[error("Column '{0}' declared more than once")]
    DuplicateColumn(String),

    // ========== Execution Errors ==========
    #[error("Column count mismatch: table '{table}' has {expected} columns, got {found} values")]
    SchemaMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate entry for Primary Key '{0}'")]
    DuplicateKey(String),

    // ========== Storage Errors ==========
    #[error("Storage error: corrupt checkpoint: {0}")]
    CorruptCheckpoint(String),

    #[error("Storage error: database halted after a failed checkpoint write; call checkpoint() to recover")]
    Halted,

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ========== Internal Errors ==========
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is a recoverable, statement-level failure.
    ///
    /// Statement-level failures are reported to the caller as a failed status;
    /// everything else is fatal and propagated as `Err`.
    pub fn is_statement_error(&self) -> bool {
        !matches!(
            self,
            Error::IoError(_)
                | Error::Serialization(_)
                | Error::CorruptCheckpoint(_)
                | Error::Halted
                | Error::Internal(_)
        )
    }
}

/// Result type alias for LiteDB operations
pub type Result<T> = std::result::Result<T, Error>;
