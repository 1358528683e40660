//! Error types for the leave tracker.
//!
//! `LeaveError` covers the failures the library can name. The store, the
//! service and the CLI propagate with `anyhow`, which wraps these.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeaveError {
    /// A leave date that no supported format accepts.
    #[error("Unparseable leave date: '{0}'")]
    InvalidDate(String),

    #[error("Leave record not found: {0}")]
    NotFound(String),

    #[error("Invalid leave record: {0}")]
    Validation(String),

    #[error("End date {to} is before start date {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
