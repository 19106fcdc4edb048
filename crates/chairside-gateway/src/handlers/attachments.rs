// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for the attachment routes (`/request-attachments`).
//!
//! Payloads travel as base64 inside JSON. The decoded size is checked
//! against the configured ceiling before anything reaches the store, so an
//! oversized upload never persists a row.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine;
use serde::{Deserialize, Serialize};

use chairside_core::types::{Attachment, NewAttachment};
use chairside_core::ChairsideError;

use crate::handlers::{non_empty, parse_flag, parse_id, require_id};
use crate::responses::{created, data, ApiError};
use crate::server::AppState;

/// Query string for GET /request-attachments.
///
/// `requestId` lists a request's attachments (metadata-only unless
/// `includeData` is truthy); `id` fetches a single attachment with payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetQuery {
    pub request_id: Option<String>,
    pub id: Option<String>,
    pub include_data: Option<String>,
}

/// Request body for POST /request-attachments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentBody {
    pub request_id: Option<i64>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    #[serde(alias = "base64", alias = "data")]
    pub data_base64: Option<String>,
    #[serde(alias = "createdBy")]
    pub uploaded_by: Option<String>,
}

/// Wire representation of a stored attachment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentView {
    pub id: i64,
    pub request_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Option<String>,
    pub uploaded_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_base64: Option<String>,
}

impl From<Attachment> for AttachmentView {
    fn from(attachment: Attachment) -> Self {
        let data_base64 = attachment
            .data
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes));
        Self {
            id: attachment.id,
            request_id: attachment.request_id,
            file_name: attachment.file_name,
            content_type: attachment.content_type,
            size_bytes: attachment.size_bytes,
            uploaded_by: attachment.uploaded_by,
            uploaded_at: attachment.uploaded_at,
            data_base64,
        }
    }
}

/// Strip an optional `data:<mime>;base64,` prefix that browser uploads carry.
fn normalize_base64(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with("data:") {
        if let Some(idx) = trimmed.find(";base64,") {
            return &trimmed[idx + ";base64,".len()..];
        }
    }
    trimmed
}

/// GET /request-attachments — list by `requestId`, or fetch one by `id`.
pub async fn list_or_get(
    State(state): State<AppState>,
    Query(query): Query<GetQuery>,
) -> Result<Response, ApiError> {
    if let Some(raw_request_id) = query
        .request_id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
    {
        let request_id = parse_id("requestId", raw_request_id)?;
        let include_data = parse_flag(query.include_data.as_deref());
        let attachments = state
            .store
            .list_attachments(request_id, include_data)
            .await?;
        let views: Vec<AttachmentView> = attachments.into_iter().map(Into::into).collect();
        return Ok(data(views).into_response());
    }

    if let Some(raw_id) = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
    {
        let id = parse_id("id", raw_id)?;
        let attachment = state
            .store
            .get_attachment(id)
            .await?
            .ok_or_else(|| ChairsideError::not_found("attachment"))?;
        return Ok(data(AttachmentView::from(attachment)).into_response());
    }

    Err(ApiError::validation(
        "requestId",
        "requestId (for list) or id (for download) is required",
    ))
}

/// POST /request-attachments — decode, bound-check, persist.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<AttachmentBody>,
) -> Result<Response, ApiError> {
    let request_id = require_id("requestId", body.request_id)?;
    let file_name = non_empty(body.file_name)
        .ok_or_else(|| ApiError::validation("fileName", "must not be empty"))?;
    let content_type = non_empty(body.content_type)
        .ok_or_else(|| ApiError::validation("contentType", "must not be empty"))?;
    let encoded = non_empty(body.data_base64)
        .ok_or_else(|| ApiError::validation("dataBase64", "must not be empty"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(normalize_base64(&encoded))
        .map_err(|_| ApiError::validation("dataBase64", "must be valid base64"))?;

    let limit_bytes = state.limits.max_upload_bytes;
    if bytes.len() > limit_bytes {
        return Err(ApiError(ChairsideError::PayloadTooLarge {
            size_bytes: bytes.len(),
            limit_bytes,
        }));
    }

    let id = state
        .store
        .add_attachment(&NewAttachment {
            request_id,
            file_name,
            content_type,
            uploaded_by: non_empty(body.uploaded_by),
            data: bytes,
        })
        .await?;
    Ok(created(id))
}

/// DELETE /request-attachments/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("id", &raw_id)?;
    state.store.delete_attachment(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(
            normalize_base64("data:image/png;base64,aGVsbG8="),
            "aGVsbG8="
        );
        assert_eq!(normalize_base64("aGVsbG8="), "aGVsbG8=");
        assert_eq!(normalize_base64("  aGVsbG8= "), "aGVsbG8=");
    }

    #[test]
    fn body_accepts_payload_aliases() {
        let primary: AttachmentBody =
            serde_json::from_str(r#"{"requestId": 1, "dataBase64": "QQ=="}"#).unwrap();
        assert_eq!(primary.data_base64.as_deref(), Some("QQ=="));

        let alias: AttachmentBody =
            serde_json::from_str(r#"{"requestId": 1, "base64": "QQ=="}"#).unwrap();
        assert_eq!(alias.data_base64.as_deref(), Some("QQ=="));

        let legacy: AttachmentBody =
            serde_json::from_str(r#"{"requestId": 1, "createdBy": "bob"}"#).unwrap();
        assert_eq!(legacy.uploaded_by.as_deref(), Some("bob"));
    }

    #[test]
    fn metadata_view_omits_payload_field() {
        let view = AttachmentView {
            id: 1,
            request_id: 2,
            file_name: "x.png".into(),
            content_type: "image/png".into(),
            size_bytes: 4,
            uploaded_by: None,
            uploaded_at: "2026-08-01T09:00:00.000Z".into(),
            data_base64: None,
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("dataBase64"));
        assert!(json.contains(r#""sizeBytes":4"#));
    }
}
