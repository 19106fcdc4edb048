// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers, one module per resource.
//!
//! Identifier and flag parsing is shared here so every route rejects bad
//! input the same way, before any store access.

pub mod attachments;
pub mod comments;
pub mod notifications;
pub mod requests;
pub mod routing;

use crate::responses::ApiError;

/// Parse a strictly positive integer identifier from its wire form.
pub(crate) fn parse_id(field: &str, raw: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::validation(field, "must be a positive integer")),
    }
}

/// Require a positive integer that arrived as an optional JSON number.
pub(crate) fn require_id(field: &str, value: Option<i64>) -> Result<i64, ApiError> {
    match value {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ApiError::validation(field, "must be a positive integer")),
    }
}

/// Truthy query flags accept "1" and "true" (any case).
pub(crate) fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Trim an optional string, dropping it entirely when blank.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
