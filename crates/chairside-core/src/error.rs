// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Chairside backend.

use thiserror::Error;

/// The primary error type used across the store trait and HTTP handlers.
///
/// The gateway maps each variant to exactly one HTTP status: `Validation`
/// is 400, `NotFound` is 404, `PayloadTooLarge` is 413, and everything
/// else is 500 with a generic body (details go to the log, not the caller).
#[derive(Debug, Error)]
pub enum ChairsideError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A required field is missing or malformed. Checked before any store access.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// No record exists for the given identifier.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// An attachment payload exceeds the configured upload ceiling.
    #[error("payload of {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    PayloadTooLarge { size_bytes: usize, limit_bytes: usize },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChairsideError {
    /// Shorthand for a `Validation` error naming the offending field.
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a `NotFound` error naming the missing resource.
    pub fn not_found<R: Into<String>>(resource: R) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}
