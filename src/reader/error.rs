//! Reader error types.

use crate::expression::QueryError;
use thiserror::Error;

/// Errors that can occur while binding or reading a sheet
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The reader is already bound to a sheet; use a new reader instead
    #[error("Sheet already specified: {current}")]
    SheetAlreadySpecified { current: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook has no active sheet")]
    NoActiveSheet,

    #[error(transparent)]
    Source(#[from] anyhow::Error),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

/// Result type for reader operations
pub type ReaderResult<T> = Result<T, ReaderError>;
