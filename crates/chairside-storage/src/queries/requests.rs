// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request CRUD operations.

use chairside_core::ChairsideError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{WorkRequest, WorkRequestDraft};

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkRequest> {
    Ok(WorkRequest {
        id: row.get(0)?,
        title: row.get(1)?,
        request_type: row.get(2)?,
        priority: row.get(3)?,
        status: row.get(4)?,
        requested_by: row.get(5)?,
        assigned_to: row.get(6)?,
        needed_by: row.get(7)?,
        location: row.get(8)?,
        equipment: row.get(9)?,
        vendor: row.get(10)?,
        description: row.get(11)?,
        requested_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

const SELECT_COLUMNS: &str = "id, title, request_type, priority, status, requested_by, \
     assigned_to, needed_by, location, equipment, vendor, description, \
     requested_at, updated_at";

/// Insert a new request. Returns the auto-generated id.
///
/// `requested_at` and `updated_at` come from the same statement, so a fresh
/// record always has them equal.
pub async fn create_request(
    db: &Database,
    draft: &WorkRequestDraft,
) -> Result<i64, ChairsideError> {
    let draft = draft.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO requests (title, request_type, priority, status, requested_by,
                     assigned_to, needed_by, location, equipment, vendor, description,
                     requested_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                     strftime('%Y-%m-%dT%H:%M:%fZ','now'),
                     strftime('%Y-%m-%dT%H:%M:%fZ','now'))",
                params![
                    draft.title,
                    draft.request_type,
                    draft.priority,
                    draft.status,
                    draft.requested_by,
                    draft.assigned_to,
                    draft.needed_by,
                    draft.location,
                    draft.equipment,
                    draft.vendor,
                    draft.description,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a request by id.
pub async fn get_request(db: &Database, id: i64) -> Result<Option<WorkRequest>, ChairsideError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn
                .prepare(&format!("SELECT {SELECT_COLUMNS} FROM requests WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], map_row);
            match result {
                Ok(request) => Ok(Some(request)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all requests, most recently requested first.
pub async fn list_requests(db: &Database) -> Result<Vec<WorkRequest>, ChairsideError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM requests ORDER BY requested_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], map_row)?;
            let mut requests = Vec::new();
            for row in rows {
                requests.push(row?);
            }
            Ok(requests)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Replace every mutable field of a request and refresh `updated_at`.
///
/// `requested_at` is never touched. Fails with `NotFound` for unknown ids.
pub async fn update_request(
    db: &Database,
    id: i64,
    draft: &WorkRequestDraft,
) -> Result<(), ChairsideError> {
    let draft = draft.clone();
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE requests SET
                     title = ?1, request_type = ?2, priority = ?3, status = ?4,
                     requested_by = ?5, assigned_to = ?6, needed_by = ?7, location = ?8,
                     equipment = ?9, vendor = ?10, description = ?11,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
                 WHERE id = ?12",
                params![
                    draft.title,
                    draft.request_type,
                    draft.priority,
                    draft.status,
                    draft.requested_by,
                    draft.assigned_to,
                    draft.needed_by,
                    draft.location,
                    draft.equipment,
                    draft.vendor,
                    draft.description,
                    id,
                ],
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if affected == 0 {
        return Err(ChairsideError::not_found("request"));
    }
    Ok(())
}

/// Soft-delete a request: status transitions to the terminal "Cancelled"
/// state so collaboration rows keep resolving. Fails with `NotFound` for
/// unknown ids.
pub async fn cancel_request(db: &Database, id: i64) -> Result<(), ChairsideError> {
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE requests SET
                     status = 'Cancelled',
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
                 WHERE id = ?1",
                params![id],
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if affected == 0 {
        return Err(ChairsideError::not_found("request"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chairside_core::types::STATUS_CANCELLED;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn make_draft(title: &str) -> WorkRequestDraft {
        WorkRequestDraft {
            title: title.to_string(),
            request_type: "maintenance".to_string(),
            priority: "High".to_string(),
            status: "New".to_string(),
            requested_by: "alice".to_string(),
            assigned_to: None,
            needed_by: None,
            location: Some("Room 2".to_string()),
            equipment: None,
            vendor: None,
            description: Some("compressor rattles".to_string()),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (db, _dir) = setup_db().await;

        let id = create_request(&db, &make_draft("Fix compressor")).await.unwrap();
        assert!(id > 0);

        let request = get_request(&db, id).await.unwrap().unwrap();
        assert_eq!(request.id, id);
        assert_eq!(request.title, "Fix compressor");
        assert_eq!(request.status, "New");
        assert_eq!(request.location.as_deref(), Some("Room 2"));
        assert!(!request.requested_at.is_empty());
        assert_eq!(
            request.requested_at, request.updated_at,
            "fresh record must have requested_at == updated_at"
        );

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn ids_are_unique_and_positive() {
        let (db, _dir) = setup_db().await;
        let a = create_request(&db, &make_draft("one")).await.unwrap();
        let b = create_request(&db, &make_draft("two")).await.unwrap();
        assert!(a > 0 && b > 0);
        assert_ne!(a, b);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_unknown_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_request(&db, 42).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (db, _dir) = setup_db().await;
        let a = create_request(&db, &make_draft("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let b = create_request(&db, &make_draft("second")).await.unwrap();

        let all = list_requests(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, b);
        assert_eq!(all[1].id, a);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_replaces_fields_and_bumps_updated_at() {
        let (db, _dir) = setup_db().await;
        let id = create_request(&db, &make_draft("before")).await.unwrap();
        let created = get_request(&db, id).await.unwrap().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut draft = make_draft("after");
        draft.status = "InProgress".to_string();
        draft.assigned_to = Some("bob".to_string());
        draft.location = None;
        update_request(&db, id, &draft).await.unwrap();

        let updated = get_request(&db, id).await.unwrap().unwrap();
        assert_eq!(updated.title, "after");
        assert_eq!(updated.status, "InProgress");
        assert_eq!(updated.assigned_to.as_deref(), Some("bob"));
        assert!(updated.location.is_none(), "omitted optionals become null");
        assert_eq!(updated.requested_at, created.requested_at);
        assert!(
            updated.updated_at > created.updated_at,
            "updated_at must increase: {} -> {}",
            created.updated_at,
            updated.updated_at
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = update_request(&db, 99, &make_draft("x")).await.unwrap_err();
        assert!(matches!(err, ChairsideError::NotFound { .. }));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn cancel_is_a_soft_delete() {
        let (db, _dir) = setup_db().await;
        let id = create_request(&db, &make_draft("doomed")).await.unwrap();
        cancel_request(&db, id).await.unwrap();

        // The record is still there, just terminal.
        let request = get_request(&db, id).await.unwrap().unwrap();
        assert_eq!(request.status, STATUS_CANCELLED);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn cancel_unknown_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = cancel_request(&db, 7).await.unwrap_err();
        assert!(matches!(err, ChairsideError::NotFound { .. }));
        db.close().await.unwrap();
    }
}
