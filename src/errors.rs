//! Unified error type for the portal service layer.
//!
//! Every operation returns [`Result`]. Validation and duplicate errors are raised
//! before any write reaches the store; store failures are split into
//! [`Error::SaveFailed`] and [`Error::LoadFailed`] so the caller can show a
//! generic retryable message without leaking the underlying store text.

use crate::core::category::LedgerCategory;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

/// All errors surfaced by the portal core.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed user input, caught before any store call
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A record with the same subject, period and discriminator already exists
    #[error("A {category} record already exists for this subject and period")]
    DuplicateEntry {
        /// Ledger the duplicate was detected in
        category: LedgerCategory,
    },

    /// The store rejected a write
    #[error("Failed to save: {message}")]
    SaveFailed {
        /// Underlying store message
        message: String,
    },

    /// The store failed to answer a read
    #[error("Failed to load: {message}")]
    LoadFailed {
        /// Underlying store message
        message: String,
    },

    /// The edit or delete target does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of row that was looked up
        entity: &'static str,
        /// Identifier that did not resolve
        id: i64,
    },

    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Store error outside of a user action (connection, schema bootstrap)
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Maps a store error raised while reading.
    #[must_use]
    pub fn load_failed(err: DbErr) -> Self {
        error!(error = %err, "Record store read failed");
        Self::LoadFailed {
            message: err.to_string(),
        }
    }

    /// Maps a store error raised while writing.
    ///
    /// Unique-constraint violations come from the store-side backstop index
    /// and are reported the same way as the application-level duplicate check.
    #[must_use]
    pub fn save_failed(category: Option<LedgerCategory>, err: DbErr) -> Self {
        if let (Some(category), Some(SqlErr::UniqueConstraintViolation(detail))) =
            (category, err.sql_err())
        {
            tracing::warn!(%category, %detail, "Store rejected duplicate ledger record");
            return Self::DuplicateEntry { category };
        }
        error!(error = %err, "Record store write failed");
        Self::SaveFailed {
            message: err.to_string(),
        }
    }

    /// Translation key the presentation layer shows for this error.
    ///
    /// Store failures all map to generic keys; the raw message is only logged.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "errors.validation",
            Self::DuplicateEntry { .. } => "errors.duplicate_entry",
            Self::SaveFailed { .. } => "errors.save_failed",
            Self::NotFound { .. } => "errors.not_found",
            Self::LoadFailed { .. }
            | Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::EnvVar(_) => "errors.load_failed",
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
