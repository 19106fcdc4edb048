// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for the comment routes (`/request-comments`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use chairside_core::types::{Comment, NewComment};

use crate::handlers::{non_empty, parse_id, require_id};
use crate::responses::{created, data, ApiError};
use crate::server::AppState;

/// Query string for GET /request-comments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub request_id: Option<String>,
}

/// Request body for POST /request-comments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentBody {
    pub request_id: Option<i64>,
    pub comment_text: Option<String>,
    pub created_by: Option<String>,
}

/// Wire representation of a stored comment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub request_id: i64,
    pub comment_text: String,
    pub created_by: Option<String>,
    pub created_at: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            request_id: comment.request_id,
            comment_text: comment.comment_text,
            created_by: comment.created_by,
            created_at: comment.created_at,
        }
    }
}

/// GET /request-comments?requestId= — chronological conversation replay.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let request_id = parse_id("requestId", query.request_id.as_deref().unwrap_or(""))?;
    let comments = state.store.list_comments(request_id).await?;
    let views: Vec<CommentView> = comments.into_iter().map(Into::into).collect();
    Ok(data(views).into_response())
}

/// POST /request-comments — append a comment.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CommentBody>,
) -> Result<Response, ApiError> {
    let request_id = require_id("requestId", body.request_id)?;
    let comment_text = body
        .comment_text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("commentText", "must not be empty"))?;

    let id = state
        .store
        .add_comment(&NewComment {
            request_id,
            comment_text,
            created_by: non_empty(body.created_by),
        })
        .await?;
    Ok(created(id))
}

/// DELETE /request-comments/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("id", &raw_id)?;
    state.store.delete_comment(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_deserializes_camel_case() {
        let json = r#"{"requestId": 3, "commentText": "on order", "createdBy": "bob"}"#;
        let body: CommentBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.request_id, Some(3));
        assert_eq!(body.comment_text.as_deref(), Some("on order"));
    }

    #[test]
    fn view_serializes_camel_case() {
        let view = CommentView {
            id: 1,
            request_id: 3,
            comment_text: "on order".into(),
            created_by: None,
            created_at: "2026-08-01T09:00:00.000Z".into(),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(r#""requestId":3"#));
        assert!(json.contains(r#""commentText":"on order""#));
    }
}
