// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait for the practice-management persistence backend.

use async_trait::async_trait;

use crate::error::ChairsideError;
use crate::types::{
    Attachment, Comment, NewAttachment, NewComment, NewNotification, NewRoutingEntry,
    Notification, RoutingEntry, WorkRequest, WorkRequestDraft,
};

/// Persistence operations for requests and their collaboration records.
///
/// The HTTP gateway holds an `Arc<dyn PracticeStore>` and never touches the
/// database directly, so handlers can be exercised against a fake in tests.
/// Implementations must enforce referential integrity: inserting a
/// collaboration record for an unknown request fails with
/// `NotFound { resource: "request" }`.
#[async_trait]
pub trait PracticeStore: Send + Sync {
    // --- Request store ---

    /// Inserts a new request and returns its server-assigned id.
    ///
    /// `requested_at` and `updated_at` are set to the same server timestamp.
    async fn create_request(&self, draft: &WorkRequestDraft) -> Result<i64, ChairsideError>;

    /// Fetches a single request, or `None` when the id is unknown.
    async fn get_request(&self, id: i64) -> Result<Option<WorkRequest>, ChairsideError>;

    /// Lists all requests, most recently requested first.
    async fn list_requests(&self) -> Result<Vec<WorkRequest>, ChairsideError>;

    /// Replaces every mutable field of a request and refreshes `updated_at`.
    async fn update_request(
        &self,
        id: i64,
        draft: &WorkRequestDraft,
    ) -> Result<(), ChairsideError>;

    /// Soft-deletes a request: status becomes "Cancelled", `updated_at` is
    /// refreshed, and all collaboration records stay resolvable.
    async fn cancel_request(&self, id: i64) -> Result<(), ChairsideError>;

    // --- Collaboration log ---

    /// Appends a comment and returns its id.
    async fn add_comment(&self, comment: &NewComment) -> Result<i64, ChairsideError>;

    /// Lists a request's comments in chronological order.
    async fn list_comments(&self, request_id: i64) -> Result<Vec<Comment>, ChairsideError>;

    /// Deletes a comment by id. Fails with `NotFound` when absent.
    async fn delete_comment(&self, id: i64) -> Result<(), ChairsideError>;

    /// Appends a routing hand-off entry and returns its id.
    async fn log_routing(&self, entry: &NewRoutingEntry) -> Result<i64, ChairsideError>;

    /// Lists a request's routing history in chronological order.
    async fn list_routing(&self, request_id: i64) -> Result<Vec<RoutingEntry>, ChairsideError>;

    // --- Notification fan-out ---

    /// Creates an unread notification and returns its id.
    async fn notify(&self, notification: &NewNotification) -> Result<i64, ChairsideError>;

    /// Lists a recipient's notifications, newest first, capped at `limit`.
    async fn list_notifications(
        &self,
        to_user: &str,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>, ChairsideError>;

    /// Counts a recipient's unread notifications.
    async fn unread_count(&self, to_user: &str) -> Result<i64, ChairsideError>;

    /// Marks one notification read. Idempotent: a second call leaves
    /// `read_at` unchanged. Fails with `NotFound` for unknown ids.
    async fn mark_read(&self, id: i64) -> Result<(), ChairsideError>;

    /// Marks every unread notification for `to_user` read and returns the
    /// number of rows affected. Other recipients are untouched.
    async fn mark_all_read(&self, to_user: &str) -> Result<u64, ChairsideError>;

    // --- Attachment store ---

    /// Persists an attachment (metadata + payload in one row), returns its id.
    async fn add_attachment(&self, attachment: &NewAttachment) -> Result<i64, ChairsideError>;

    /// Lists a request's attachments in upload order. Payloads are included
    /// only when `include_data` is set.
    async fn list_attachments(
        &self,
        request_id: i64,
        include_data: bool,
    ) -> Result<Vec<Attachment>, ChairsideError>;

    /// Fetches one attachment including its payload, or `None` when absent.
    async fn get_attachment(&self, id: i64) -> Result<Option<Attachment>, ChairsideError>;

    /// Deletes an attachment (metadata and payload together). Fails with
    /// `NotFound` when absent.
    async fn delete_attachment(&self, id: i64) -> Result<(), ChairsideError>;
}
