// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for the notification fan-out routes (`/request-notifications`).

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use chairside_core::types::{NewNotification, Notification, DEFAULT_NOTIFICATION_TYPE};

use crate::handlers::{non_empty, parse_flag, parse_id, require_id};
use crate::responses::{created, data, ApiError, CreatedBody};
use crate::server::AppState;

/// Query string for GET /request-notifications.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub to: Option<String>,
    pub unread: Option<String>,
    pub limit: Option<String>,
}

/// Query string for GET /request-notifications/unread-count.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CountQuery {
    pub to: Option<String>,
}

/// Request body for POST /request-notifications.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationBody {
    pub request_id: Option<i64>,
    pub to_user: Option<String>,
    pub from_user: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub message: Option<String>,
}

/// Request body for PUT /request-notifications.
///
/// Either `{ "markAllRead": true, "toUser": "..." }` for the bulk operation
/// or `{ "id": n }` to flip a single row.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadBody {
    pub mark_all_read: bool,
    pub to_user: Option<String>,
    pub id: Option<i64>,
}

/// Wire representation of a stored notification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: i64,
    pub request_id: i64,
    pub to_user: String,
    pub from_user: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub created_at: String,
    pub is_read: bool,
    pub read_at: Option<String>,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            request_id: notification.request_id,
            to_user: notification.to_user,
            from_user: notification.from_user,
            notification_type: notification.notification_type,
            message: notification.message,
            created_at: notification.created_at,
            is_read: notification.is_read,
            read_at: notification.read_at,
        }
    }
}

/// Body for the bulk mark-all-read response.
#[derive(Debug, Serialize)]
pub struct MarkAllReadBody {
    /// Number of notifications flipped to read.
    pub updated: u64,
}

/// Body for the unread-count response.
#[derive(Debug, Serialize)]
pub struct UnreadCountBody {
    pub count: i64,
}

/// GET /request-notifications?to=&unread=&limit= — newest first.
///
/// `limit` falls back to the configured default page size and is clamped
/// to `[1, max_page_size]`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let to_user = non_empty(query.to)
        .ok_or_else(|| ApiError::validation("to", "recipient user is required"))?;
    let unread_only = parse_flag(query.unread.as_deref());

    let limits = &state.limits;
    let limit = query
        .limit
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(limits.default_page_size)
        .clamp(1, limits.max_page_size);

    let notifications = state
        .store
        .list_notifications(&to_user, unread_only, limit)
        .await?;
    let views: Vec<NotificationView> = notifications.into_iter().map(Into::into).collect();
    Ok(data(views).into_response())
}

/// GET /request-notifications/unread-count?to=
pub async fn unread_count(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Result<Response, ApiError> {
    let to_user = non_empty(query.to)
        .ok_or_else(|| ApiError::validation("to", "recipient user is required"))?;
    let count = state.store.unread_count(&to_user).await?;
    Ok(data(UnreadCountBody { count }).into_response())
}

/// POST /request-notifications — fan out one unread notification.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NotificationBody>,
) -> Result<Response, ApiError> {
    let request_id = require_id("requestId", body.request_id)?;
    let to_user = non_empty(body.to_user)
        .ok_or_else(|| ApiError::validation("toUser", "must not be empty"))?;
    let message = non_empty(body.message)
        .ok_or_else(|| ApiError::validation("message", "must not be empty"))?;

    let id = state
        .store
        .notify(&NewNotification {
            request_id,
            to_user,
            from_user: non_empty(body.from_user),
            notification_type: non_empty(body.notification_type)
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_TYPE.to_string()),
            message,
        })
        .await?;
    Ok(created(id))
}

/// PUT /request-notifications/{id} — mark one notification read.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("id", &raw_id)?;
    state.store.mark_read(id).await?;
    Ok(data(CreatedBody { id }).into_response())
}

/// PUT /request-notifications — bulk mark-all-read, or mark one by body id.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<ReadBody>,
) -> Result<Response, ApiError> {
    if body.mark_all_read {
        let to_user = non_empty(body.to_user)
            .ok_or_else(|| ApiError::validation("toUser", "required for markAllRead"))?;
        let updated = state.store.mark_all_read(&to_user).await?;
        return Ok(data(MarkAllReadBody { updated }).into_response());
    }

    let id = require_id("id", body.id)?;
    state.store.mark_read(id).await?;
    Ok(data(CreatedBody { id }).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_body_defaults_type() {
        let json = r#"{"requestId": 1, "toUser": "bob", "message": "hi"}"#;
        let body: NotificationBody = serde_json::from_str(json).unwrap();
        assert!(body.notification_type.is_none());
        assert_eq!(body.to_user.as_deref(), Some("bob"));
    }

    #[test]
    fn read_body_accepts_both_shapes() {
        let bulk: ReadBody =
            serde_json::from_str(r#"{"markAllRead": true, "toUser": "bob"}"#).unwrap();
        assert!(bulk.mark_all_read);
        assert_eq!(bulk.to_user.as_deref(), Some("bob"));

        let single: ReadBody = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        assert!(!single.mark_all_read);
        assert_eq!(single.id, Some(9));
    }

    #[test]
    fn view_serializes_type_and_read_fields() {
        let view = NotificationView {
            id: 1,
            request_id: 2,
            to_user: "bob".into(),
            from_user: None,
            notification_type: "update".into(),
            message: "forwarded to you".into(),
            created_at: "2026-08-01T09:00:00.000Z".into(),
            is_read: false,
            read_at: None,
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(r#""type":"update""#));
        assert!(json.contains(r#""isRead":false"#));
        assert!(json.contains(r#""readAt":null"#));
    }
}
