// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain entity types shared by the store and the HTTP gateway.
//!
//! Timestamps are ISO-8601 UTC text with millisecond precision, generated
//! server-side by the store. Identifiers are strictly positive `i64` values
//! assigned by the store on insert.

use serde::{Deserialize, Serialize};

/// Terminal status a request transitions to on soft delete.
pub const STATUS_CANCELLED: &str = "Cancelled";

/// Initial status assigned when a request is created without one.
pub const STATUS_NEW: &str = "New";

/// Default routing action when the caller omits one.
pub const DEFAULT_ROUTING_ACTION: &str = "forwarded";

/// Default notification category when the caller omits one.
pub const DEFAULT_NOTIFICATION_TYPE: &str = "update";

/// A tracked work item (equipment repair, purchase, maintenance, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRequest {
    pub id: i64,
    pub title: String,
    pub request_type: String,
    pub priority: String,
    /// Free-text lifecycle state, e.g. "New", "InProgress", "Completed",
    /// or the terminal "Cancelled" set by soft delete.
    pub status: String,
    pub requested_by: String,
    pub assigned_to: Option<String>,
    pub needed_by: Option<String>,
    pub location: Option<String>,
    pub equipment: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
    /// Set once on insert, never mutated.
    pub requested_at: String,
    /// Refreshed on every mutation; equals `requested_at` on a fresh record.
    pub updated_at: String,
}

/// Mutable fields of a [`WorkRequest`], used for create and full-replace update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkRequestDraft {
    pub title: String,
    pub request_type: String,
    pub priority: String,
    pub status: String,
    pub requested_by: String,
    pub assigned_to: Option<String>,
    pub needed_by: Option<String>,
    pub location: Option<String>,
    pub equipment: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
}

/// An append-only comment on a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub request_id: i64,
    pub comment_text: String,
    pub created_by: Option<String>,
    pub created_at: String,
}

/// Fields for a new [`Comment`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub request_id: i64,
    pub comment_text: String,
    pub created_by: Option<String>,
}

/// One hand-off in a request's routing audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingEntry {
    pub id: i64,
    pub request_id: i64,
    pub from_user: Option<String>,
    pub to_user: String,
    pub action: String,
    pub note: Option<String>,
    pub created_at: String,
}

/// Fields for a new [`RoutingEntry`]. `action` must already be defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoutingEntry {
    pub request_id: i64,
    pub from_user: Option<String>,
    pub to_user: String,
    pub action: String,
    pub note: Option<String>,
}

/// A per-recipient notification record.
///
/// Immutable after insert except for the `is_read`/`read_at` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub request_id: i64,
    pub to_user: String,
    pub from_user: Option<String>,
    pub notification_type: String,
    pub message: String,
    pub created_at: String,
    pub is_read: bool,
    pub read_at: Option<String>,
}

/// Fields for a new [`Notification`]. `notification_type` must already be defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub request_id: i64,
    pub to_user: String,
    pub from_user: Option<String>,
    pub notification_type: String,
    pub message: String,
}

/// A binary attachment on a request.
///
/// `data` is `None` when the record was fetched metadata-only; the payload
/// itself is write-once and never mutated after insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub id: i64,
    pub request_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Option<String>,
    pub uploaded_at: String,
    pub data: Option<Vec<u8>>,
}

/// Fields for a new [`Attachment`]. `data` holds the decoded payload bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttachment {
    pub request_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub uploaded_by: Option<String>,
    pub data: Vec<u8>,
}
