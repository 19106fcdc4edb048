// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for the request store routes (`/requests`).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use chairside_core::types::{WorkRequest, WorkRequestDraft, STATUS_NEW};
use chairside_core::ChairsideError;

use crate::handlers::{non_empty, parse_id};
use crate::responses::{created, data, ApiError, CreatedBody};
use crate::server::AppState;

/// Request body for POST and PUT on `/requests`.
///
/// PUT carries full-replace semantics: omitted optional fields become null
/// on the stored record, and an omitted `status` resets to "New".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkRequestBody {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub requested_by: Option<String>,
    pub assigned_to: Option<String>,
    pub needed_by: Option<String>,
    pub location: Option<String>,
    pub equipment: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
}

impl WorkRequestBody {
    fn into_draft(self) -> Result<WorkRequestDraft, ApiError> {
        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return Err(ApiError::validation("title", "must not be empty"));
        }
        Ok(WorkRequestDraft {
            title,
            request_type: self.request_type.unwrap_or_default().trim().to_string(),
            priority: self.priority.unwrap_or_default().trim().to_string(),
            status: non_empty(self.status).unwrap_or_else(|| STATUS_NEW.to_string()),
            requested_by: self.requested_by.unwrap_or_default().trim().to_string(),
            assigned_to: non_empty(self.assigned_to),
            needed_by: non_empty(self.needed_by),
            location: non_empty(self.location),
            equipment: non_empty(self.equipment),
            vendor: non_empty(self.vendor),
            description: self.description.filter(|d| !d.is_empty()),
        })
    }
}

/// Wire representation of a stored request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRequestView {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
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
    pub requested_at: String,
    pub updated_at: String,
}

impl From<WorkRequest> for WorkRequestView {
    fn from(request: WorkRequest) -> Self {
        Self {
            id: request.id,
            title: request.title,
            request_type: request.request_type,
            priority: request.priority,
            status: request.status,
            requested_by: request.requested_by,
            assigned_to: request.assigned_to,
            needed_by: request.needed_by,
            location: request.location,
            equipment: request.equipment,
            vendor: request.vendor,
            description: request.description,
            requested_at: request.requested_at,
            updated_at: request.updated_at,
        }
    }
}

/// GET /requests — all requests, most recently requested first.
pub async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let requests = state.store.list_requests().await?;
    let views: Vec<WorkRequestView> = requests.into_iter().map(Into::into).collect();
    Ok(data(views).into_response())
}

/// POST /requests — create, returning the new id.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<WorkRequestBody>,
) -> Result<Response, ApiError> {
    let draft = body.into_draft()?;
    let id = state.store.create_request(&draft).await?;
    Ok(created(id))
}

/// GET /requests/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("id", &raw_id)?;
    let request = state
        .store
        .get_request(id)
        .await?
        .ok_or_else(|| ChairsideError::not_found("request"))?;
    Ok(data(WorkRequestView::from(request)).into_response())
}

/// PUT /requests/{id} — full-record replace.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<WorkRequestBody>,
) -> Result<Response, ApiError> {
    let id = parse_id("id", &raw_id)?;
    let draft = body.into_draft()?;
    state.store.update_request(id, &draft).await?;
    Ok(data(CreatedBody { id }).into_response())
}

/// DELETE /requests/{id} — soft delete to the terminal "Cancelled" status.
pub async fn cancel(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("id", &raw_id)?;
    state.store.cancel_request(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_deserializes_with_camel_case_and_type_alias() {
        let json = r#"{
            "title": "Fix compressor",
            "type": "maintenance",
            "priority": "High",
            "requestedBy": "alice"
        }"#;
        let body: WorkRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.request_type.as_deref(), Some("maintenance"));
        assert_eq!(body.requested_by.as_deref(), Some("alice"));
    }

    #[test]
    fn draft_defaults_status_to_new() {
        let body: WorkRequestBody = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        let draft = body.into_draft().unwrap();
        assert_eq!(draft.status, "New");
        assert!(draft.assigned_to.is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        let body: WorkRequestBody = serde_json::from_str(r#"{"title": "   "}"#).unwrap();
        assert!(body.into_draft().is_err());

        let body: WorkRequestBody = serde_json::from_str("{}").unwrap();
        assert!(body.into_draft().is_err());
    }

    #[test]
    fn view_serializes_type_field() {
        let view = WorkRequestView {
            id: 1,
            title: "t".into(),
            request_type: "repair".into(),
            priority: "Low".into(),
            status: "New".into(),
            requested_by: "alice".into(),
            assigned_to: None,
            needed_by: None,
            location: None,
            equipment: None,
            vendor: None,
            description: None,
            requested_at: "2026-08-01T09:00:00.000Z".into(),
            updated_at: "2026-08-01T09:00:00.000Z".into(),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(r#""type":"repair""#));
        assert!(json.contains(r#""requestedBy":"alice""#));
        assert!(json.contains(r#""requestedAt":"#));
    }
}
