// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for the routing log routes (`/request-routing`).

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use chairside_core::types::{NewRoutingEntry, RoutingEntry, DEFAULT_ROUTING_ACTION};

use crate::handlers::{non_empty, parse_id, require_id};
use crate::responses::{created, data, ApiError};
use crate::server::AppState;

/// Query string for GET /request-routing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub request_id: Option<String>,
}

/// Request body for POST /request-routing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingBody {
    pub request_id: Option<i64>,
    pub from_user: Option<String>,
    pub to_user: Option<String>,
    pub action: Option<String>,
    pub note: Option<String>,
}

/// Wire representation of a stored routing entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingView {
    pub id: i64,
    pub request_id: i64,
    pub from_user: Option<String>,
    pub to_user: String,
    pub action: String,
    pub note: Option<String>,
    pub created_at: String,
}

impl From<RoutingEntry> for RoutingView {
    fn from(entry: RoutingEntry) -> Self {
        Self {
            id: entry.id,
            request_id: entry.request_id,
            from_user: entry.from_user,
            to_user: entry.to_user,
            action: entry.action,
            note: entry.note,
            created_at: entry.created_at,
        }
    }
}

/// GET /request-routing?requestId= — the hand-off history of a request.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let request_id = parse_id("requestId", query.request_id.as_deref().unwrap_or(""))?;
    let entries = state.store.list_routing(request_id).await?;
    let views: Vec<RoutingView> = entries.into_iter().map(Into::into).collect();
    Ok(data(views).into_response())
}

/// POST /request-routing — record a hand-off.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<RoutingBody>,
) -> Result<Response, ApiError> {
    let request_id = require_id("requestId", body.request_id)?;
    let to_user = non_empty(body.to_user)
        .ok_or_else(|| ApiError::validation("toUser", "must not be empty"))?;

    let id = state
        .store
        .log_routing(&NewRoutingEntry {
            request_id,
            from_user: non_empty(body.from_user),
            to_user,
            action: non_empty(body.action).unwrap_or_else(|| DEFAULT_ROUTING_ACTION.to_string()),
            note: non_empty(body.note),
        })
        .await?;
    Ok(created(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_deserializes_camel_case() {
        let json = r#"{"requestId": 2, "fromUser": "alice", "toUser": "bob", "note": "urgent"}"#;
        let body: RoutingBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.request_id, Some(2));
        assert_eq!(body.to_user.as_deref(), Some("bob"));
        assert!(body.action.is_none());
    }

    #[test]
    fn view_serializes_camel_case() {
        let view = RoutingView {
            id: 1,
            request_id: 2,
            from_user: Some("alice".into()),
            to_user: "bob".into(),
            action: "forwarded".into(),
            note: None,
            created_at: "2026-08-01T09:00:00.000Z".into(),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(r#""fromUser":"alice""#));
        assert!(json.contains(r#""toUser":"bob""#));
    }
}
