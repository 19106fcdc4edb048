// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use chairside_core::{ChairsideError, PracticeStore};

use crate::cors;
use crate::handlers;
use crate::responses::ErrorBody;

/// Per-call bounds sourced from configuration once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RequestLimits {
    /// Decoded-size ceiling for one attachment upload.
    pub max_upload_bytes: usize,
    /// Page size used when a notification listing omits `limit`.
    pub default_page_size: i64,
    /// Upper bound any requested `limit` is clamped to.
    pub max_page_size: i64,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The injected store; handlers never touch the database directly.
    pub store: Arc<dyn PracticeStore>,
    /// Upload and paging bounds.
    pub limits: RequestLimits,
}

/// Gateway server configuration (mirrors GatewayConfig from chairside-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// JSON body ceiling for the attachment route: base64 expands the payload
/// by 4/3, plus headroom for the JSON wrapper fields.
fn json_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes / 3 * 4 + 64 * 1024
}

/// Build the full route table with middleware and shared state.
pub fn build_router(state: AppState) -> Router {
    let attachment_body_limit = json_body_limit(state.limits.max_upload_bytes);

    Router::new()
        .route(
            "/requests",
            get(handlers::requests::list).post(handlers::requests::create),
        )
        .route(
            "/requests/{id}",
            get(handlers::requests::get)
                .put(handlers::requests::update)
                .delete(handlers::requests::cancel),
        )
        .route(
            "/request-comments",
            get(handlers::comments::list).post(handlers::comments::create),
        )
        .route("/request-comments/{id}", delete(handlers::comments::remove))
        .route(
            "/request-routing",
            get(handlers::routing::list).post(handlers::routing::create),
        )
        .route(
            "/request-notifications",
            get(handlers::notifications::list)
                .post(handlers::notifications::create)
                .put(handlers::notifications::update),
        )
        .route(
            "/request-notifications/unread-count",
            get(handlers::notifications::unread_count),
        )
        .route(
            "/request-notifications/{id}",
            put(handlers::notifications::mark_read),
        )
        .route(
            "/request-attachments",
            get(handlers::attachments::list_or_get)
                .post(handlers::attachments::create)
                // Base64 payloads outgrow axum's default JSON limit.
                .layer(DefaultBodyLimit::max(attachment_body_limit)),
        )
        .route(
            "/request-attachments/{id}",
            delete(handlers::attachments::remove),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(cors::cors_middleware))
        .with_state(state)
}

/// Envelope-shaped 404 for unknown paths.
async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "route not found".to_string(),
        }),
    )
        .into_response()
}

/// Envelope-shaped 405 for known paths hit with an unsupported method.
async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "method not allowed".to_string(),
        }),
    )
        .into_response()
}

/// Start the gateway HTTP server and serve until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ChairsideError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ChairsideError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ChairsideError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chairside_core::types::*;

    struct UnreachableStore;

    #[async_trait]
    impl PracticeStore for UnreachableStore {
        async fn create_request(&self, _: &WorkRequestDraft) -> Result<i64, ChairsideError> {
            unreachable!()
        }
        async fn get_request(&self, _: i64) -> Result<Option<WorkRequest>, ChairsideError> {
            unreachable!()
        }
        async fn list_requests(&self) -> Result<Vec<WorkRequest>, ChairsideError> {
            unreachable!()
        }
        async fn update_request(
            &self,
            _: i64,
            _: &WorkRequestDraft,
        ) -> Result<(), ChairsideError> {
            unreachable!()
        }
        async fn cancel_request(&self, _: i64) -> Result<(), ChairsideError> {
            unreachable!()
        }
        async fn add_comment(&self, _: &NewComment) -> Result<i64, ChairsideError> {
            unreachable!()
        }
        async fn list_comments(&self, _: i64) -> Result<Vec<Comment>, ChairsideError> {
            unreachable!()
        }
        async fn delete_comment(&self, _: i64) -> Result<(), ChairsideError> {
            unreachable!()
        }
        async fn log_routing(&self, _: &NewRoutingEntry) -> Result<i64, ChairsideError> {
            unreachable!()
        }
        async fn list_routing(&self, _: i64) -> Result<Vec<RoutingEntry>, ChairsideError> {
            unreachable!()
        }
        async fn notify(&self, _: &NewNotification) -> Result<i64, ChairsideError> {
            unreachable!()
        }
        async fn list_notifications(
            &self,
            _: &str,
            _: bool,
            _: i64,
        ) -> Result<Vec<Notification>, ChairsideError> {
            unreachable!()
        }
        async fn unread_count(&self, _: &str) -> Result<i64, ChairsideError> {
            unreachable!()
        }
        async fn mark_read(&self, _: i64) -> Result<(), ChairsideError> {
            unreachable!()
        }
        async fn mark_all_read(&self, _: &str) -> Result<u64, ChairsideError> {
            unreachable!()
        }
        async fn add_attachment(&self, _: &NewAttachment) -> Result<i64, ChairsideError> {
            unreachable!()
        }
        async fn list_attachments(
            &self,
            _: i64,
            _: bool,
        ) -> Result<Vec<Attachment>, ChairsideError> {
            unreachable!()
        }
        async fn get_attachment(&self, _: i64) -> Result<Option<Attachment>, ChairsideError> {
            unreachable!()
        }
        async fn delete_attachment(&self, _: i64) -> Result<(), ChairsideError> {
            unreachable!()
        }
    }

    #[test]
    fn router_builds_with_trait_object_state() {
        let state = AppState {
            store: Arc::new(UnreachableStore),
            limits: RequestLimits {
                max_upload_bytes: 4 * 1024 * 1024,
                default_page_size: 50,
                max_page_size: 200,
            },
        };
        let _router = build_router(state);
    }

    #[test]
    fn body_limit_leaves_room_for_base64_expansion() {
        let limit = json_body_limit(4 * 1024 * 1024);
        // ceil(4MiB * 4/3) fits, plus wrapper headroom.
        assert!(limit > 4 * 1024 * 1024 * 4 / 3);
        assert!(limit < 6 * 1024 * 1024);
    }
}
