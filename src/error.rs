//! Error type shared by every persister operation.
//!
//! Storage-engine errors are wrapped here and never leak to callers as raw
//! `rusqlite::Error` values; the original error stays reachable through
//! [`std::error::Error::source`].

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result type alias using [`PersistenceError`]
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Coarse classification of a [`PersistenceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorKind {
    /// Rejected before any statement was issued
    InvalidInput,
    /// The storage engine refused the write (foreign key, NOT NULL, ...)
    ConstraintViolation,
    /// The targeted identity has no row
    NotFound,
    /// Any other engine or I/O failure
    Storage,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct PersistenceError {
    kind: PersistenceErrorKind,
    message: String,
    #[source]
    source: Option<rusqlite::Error>,
}

impl PersistenceError {
    pub fn new(kind: PersistenceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> PersistenceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validation failure detected before touching the database
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::InvalidInput, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::NotFound, message)
    }

    /// Wrap a rusqlite error, classifying constraint violations
    pub fn from_rusqlite(message: impl Into<String>, err: rusqlite::Error) -> Self {
        let kind = match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => PersistenceErrorKind::ConstraintViolation,
            _ => PersistenceErrorKind::Storage,
        };
        Self {
            kind,
            message: format!("{}: {}", message.into(), err),
            source: Some(err),
        }
    }
}

/// Build a `map_err` closure that wraps rusqlite errors with `message`
pub(crate) fn storage(message: &'static str) -> impl FnOnce(rusqlite::Error) -> PersistenceError {
    move |err| PersistenceError::from_rusqlite(message, err)
}
