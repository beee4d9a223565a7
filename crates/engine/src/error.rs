//! The module contains the errors the engines can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a delete/remove target does not match any row.
//! - [`InvalidRegistrationNumber`] thrown when user input is not a
//!   registration number.
//! - [`InvalidColumns`] thrown when a column selection names an unknown header.
//! - [`InvalidAmount`] thrown when a custom fee rule makes the totals overflow.
//!
//! Orphaned child drafts and incomplete registration lengths are normal states,
//! not errors.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidRegistrationNumber`]: EngineError::InvalidRegistrationNumber
//!  [`InvalidColumns`]: EngineError::InvalidColumns
//!  [`InvalidAmount`]: EngineError::InvalidAmount
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid registration number: {0}")]
    InvalidRegistrationNumber(String),
    #[error("Invalid columns: {0}")]
    InvalidColumns(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid registration type: {0}")]
    InvalidRegistrationType(String),
    #[error("Nothing to restore")]
    NothingToRestore,
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Column store error: {0}")]
    ColumnStore(String),
}
