// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the PracticeStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use chairside_config::model::StorageConfig;
use chairside_core::types::{
    Attachment, Comment, NewAttachment, NewComment, NewNotification, NewRoutingEntry,
    Notification, RoutingEntry, WorkRequest, WorkRequestDraft,
};
use chairside_core::{ChairsideError, PracticeStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed practice store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), ChairsideError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ChairsideError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint and flush; call once on shutdown.
    pub async fn close(&self) -> Result<(), ChairsideError> {
        self.db()?.close().await
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, ChairsideError> {
        self.db.get().ok_or_else(|| ChairsideError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PracticeStore for SqliteStore {
    // --- Request store ---

    async fn create_request(&self, draft: &WorkRequestDraft) -> Result<i64, ChairsideError> {
        queries::requests::create_request(self.db()?, draft).await
    }

    async fn get_request(&self, id: i64) -> Result<Option<WorkRequest>, ChairsideError> {
        queries::requests::get_request(self.db()?, id).await
    }

    async fn list_requests(&self) -> Result<Vec<WorkRequest>, ChairsideError> {
        queries::requests::list_requests(self.db()?).await
    }

    async fn update_request(
        &self,
        id: i64,
        draft: &WorkRequestDraft,
    ) -> Result<(), ChairsideError> {
        queries::requests::update_request(self.db()?, id, draft).await
    }

    async fn cancel_request(&self, id: i64) -> Result<(), ChairsideError> {
        queries::requests::cancel_request(self.db()?, id).await
    }

    // --- Collaboration log ---

    async fn add_comment(&self, comment: &NewComment) -> Result<i64, ChairsideError> {
        queries::comments::add_comment(self.db()?, comment).await
    }

    async fn list_comments(&self, request_id: i64) -> Result<Vec<Comment>, ChairsideError> {
        queries::comments::list_comments(self.db()?, request_id).await
    }

    async fn delete_comment(&self, id: i64) -> Result<(), ChairsideError> {
        queries::comments::delete_comment(self.db()?, id).await
    }

    async fn log_routing(&self, entry: &NewRoutingEntry) -> Result<i64, ChairsideError> {
        queries::routing::log_routing(self.db()?, entry).await
    }

    async fn list_routing(&self, request_id: i64) -> Result<Vec<RoutingEntry>, ChairsideError> {
        queries::routing::list_routing(self.db()?, request_id).await
    }

    // --- Notification fan-out ---

    async fn notify(&self, notification: &NewNotification) -> Result<i64, ChairsideError> {
        queries::notifications::notify(self.db()?, notification).await
    }

    async fn list_notifications(
        &self,
        to_user: &str,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>, ChairsideError> {
        queries::notifications::list_notifications(self.db()?, to_user, unread_only, limit).await
    }

    async fn unread_count(&self, to_user: &str) -> Result<i64, ChairsideError> {
        queries::notifications::unread_count(self.db()?, to_user).await
    }

    async fn mark_read(&self, id: i64) -> Result<(), ChairsideError> {
        queries::notifications::mark_read(self.db()?, id).await
    }

    async fn mark_all_read(&self, to_user: &str) -> Result<u64, ChairsideError> {
        queries::notifications::mark_all_read(self.db()?, to_user).await
    }

    // --- Attachment store ---

    async fn add_attachment(&self, attachment: &NewAttachment) -> Result<i64, ChairsideError> {
        queries::attachments::add_attachment(self.db()?, attachment).await
    }

    async fn list_attachments(
        &self,
        request_id: i64,
        include_data: bool,
    ) -> Result<Vec<Attachment>, ChairsideError> {
        queries::attachments::list_attachments(self.db()?, request_id, include_data).await
    }

    async fn get_attachment(&self, id: i64) -> Result<Option<Attachment>, ChairsideError> {
        queries::attachments::get_attachment(self.db()?, id).await
    }

    async fn delete_attachment(&self, id: i64) -> Result<(), ChairsideError> {
        queries::attachments::delete_attachment(self.db()?, id).await
    }
}
