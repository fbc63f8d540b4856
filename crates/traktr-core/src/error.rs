// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Traktr client core.

use thiserror::Error;

/// The primary error type used across the Traktr crates.
///
/// Callers are expected to degrade rather than abort: network errors fall
/// back to local behaviour, storage errors on cached records are treated as
/// "absent", and only permission errors are surfaced as-is.
#[derive(Debug, Error)]
pub enum TraktrError {
    /// Configuration errors (invalid TOML, bad values, unusable URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local key-value storage errors (open, read, write).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A persisted or received JSON document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote endpoint errors (transport failure, non-success status, bad payload).
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The current identity is not allowed to perform the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The operation does not apply to the record's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Caller-supplied input failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}

impl TraktrError {
    /// Wraps any error as a storage error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TraktrError::Storage {
            source: Box::new(err),
        }
    }

    /// Returns true for errors that should be shown to the user as-is
    /// instead of being recovered locally.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TraktrError::PermissionDenied(_) | TraktrError::Validation(_)
        )
    }
}
