// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment operations: write-once binary payloads keyed to a request.
//!
//! Metadata and payload live in one row; list queries skip the payload
//! column unless asked, so list views stay cheap.

use chairside_core::ChairsideError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Attachment, NewAttachment};

/// Persist an attachment. Returns the auto-generated id.
///
/// Size enforcement happens before the store is reached; `size_bytes` is
/// derived from the payload here so the two can never disagree.
pub async fn add_attachment(
    db: &Database,
    attachment: &NewAttachment,
) -> Result<i64, ChairsideError> {
    let attachment = attachment.clone();
    let id = db
        .connection()
        .call(move |conn| {
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM requests WHERE id = ?1)",
                params![attachment.request_id],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Ok(None);
            }
            let size_bytes = attachment.data.len() as i64;
            conn.execute(
                "INSERT INTO request_attachments
                     (request_id, file_name, content_type, size_bytes, data,
                      uploaded_by, uploaded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, strftime('%Y-%m-%dT%H:%M:%fZ','now'))",
                params![
                    attachment.request_id,
                    attachment.file_name,
                    attachment.content_type,
                    size_bytes,
                    attachment.data,
                    attachment.uploaded_by,
                ],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    id.ok_or_else(|| ChairsideError::not_found("request"))
}

/// List a request's attachments in upload order.
///
/// Payloads are fetched only when `include_data` is set; otherwise `data`
/// is `None` on every returned record.
pub async fn list_attachments(
    db: &Database,
    request_id: i64,
    include_data: bool,
) -> Result<Vec<Attachment>, ChairsideError> {
    db.connection()
        .call(move |conn| {
            let mut attachments = Vec::new();
            if include_data {
                let mut stmt = conn.prepare(
                    "SELECT id, request_id, file_name, content_type, size_bytes,
                            uploaded_by, uploaded_at, data
                     FROM request_attachments WHERE request_id = ?1
                     ORDER BY uploaded_at ASC, id ASC",
                )?;
                let rows = stmt.query_map(params![request_id], |row| {
                    Ok(Attachment {
                        id: row.get(0)?,
                        request_id: row.get(1)?,
                        file_name: row.get(2)?,
                        content_type: row.get(3)?,
                        size_bytes: row.get(4)?,
                        uploaded_by: row.get(5)?,
                        uploaded_at: row.get(6)?,
                        data: Some(row.get(7)?),
                    })
                })?;
                for row in rows {
                    attachments.push(row?);
                }
            } else {
                let mut stmt = conn.prepare(
                    "SELECT id, request_id, file_name, content_type, size_bytes,
                            uploaded_by, uploaded_at
                     FROM request_attachments WHERE request_id = ?1
                     ORDER BY uploaded_at ASC, id ASC",
                )?;
                let rows = stmt.query_map(params![request_id], |row| {
                    Ok(Attachment {
                        id: row.get(0)?,
                        request_id: row.get(1)?,
                        file_name: row.get(2)?,
                        content_type: row.get(3)?,
                        size_bytes: row.get(4)?,
                        uploaded_by: row.get(5)?,
                        uploaded_at: row.get(6)?,
                        data: None,
                    })
                })?;
                for row in rows {
                    attachments.push(row?);
                }
            }
            Ok(attachments)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch one attachment including its payload.
pub async fn get_attachment(db: &Database, id: i64) -> Result<Option<Attachment>, ChairsideError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, request_id, file_name, content_type, size_bytes,
                        uploaded_by, uploaded_at, data
                 FROM request_attachments WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(Attachment {
                    id: row.get(0)?,
                    request_id: row.get(1)?,
                    file_name: row.get(2)?,
                    content_type: row.get(3)?,
                    size_bytes: row.get(4)?,
                    uploaded_by: row.get(5)?,
                    uploaded_at: row.get(6)?,
                    data: Some(row.get(7)?),
                })
            });
            match result {
                Ok(attachment) => Ok(Some(attachment)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete an attachment (metadata and payload together).
pub async fn delete_attachment(db: &Database, id: i64) -> Result<(), ChairsideError> {
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute("DELETE FROM request_attachments WHERE id = ?1", params![id])
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if affected == 0 {
        return Err(ChairsideError::not_found("attachment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkRequestDraft;
    use crate::queries::requests::create_request;
    use tempfile::tempdir;

    async fn setup_db_with_request() -> (Database, i64, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        let draft = WorkRequestDraft {
            title: "Panoramic unit error 52".to_string(),
            status: "New".to_string(),
            requested_by: "alice".to_string(),
            ..Default::default()
        };
        let request_id = create_request(&db, &draft).await.unwrap();
        (db, request_id, dir)
    }

    fn make_attachment(request_id: i64, name: &str, payload: &[u8]) -> NewAttachment {
        NewAttachment {
            request_id,
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            uploaded_by: Some("alice".to_string()),
            data: payload.to_vec(),
        }
    }

    #[tokio::test]
    async fn payload_round_trips_and_size_is_derived() {
        let (db, request_id, _dir) = setup_db_with_request().await;
        let payload = vec![0xAB_u8; 1024];

        let id = add_attachment(&db, &make_attachment(request_id, "error.png", &payload))
            .await
            .unwrap();

        let fetched = get_attachment(&db, id).await.unwrap().unwrap();
        assert_eq!(fetched.file_name, "error.png");
        assert_eq!(fetched.size_bytes, 1024);
        assert_eq!(fetched.data.as_deref(), Some(payload.as_slice()));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn listing_is_metadata_only_by_default() {
        let (db, request_id, _dir) = setup_db_with_request().await;
        add_attachment(&db, &make_attachment(request_id, "a.png", b"aaaa"))
            .await
            .unwrap();
        add_attachment(&db, &make_attachment(request_id, "b.png", b"bbbb"))
            .await
            .unwrap();

        let metadata = list_attachments(&db, request_id, false).await.unwrap();
        assert_eq!(metadata.len(), 2);
        assert!(metadata.iter().all(|a| a.data.is_none()));
        assert_eq!(metadata[0].file_name, "a.png");

        let with_data = list_attachments(&db, request_id, true).await.unwrap();
        assert_eq!(with_data[1].data.as_deref(), Some(b"bbbb".as_slice()));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_unknown_returns_none() {
        let (db, _request_id, _dir) = setup_db_with_request().await;
        assert!(get_attachment(&db, 9).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_removes_metadata_and_payload_together() {
        let (db, request_id, _dir) = setup_db_with_request().await;
        let id = add_attachment(&db, &make_attachment(request_id, "x.png", b"xx"))
            .await
            .unwrap();

        delete_attachment(&db, id).await.unwrap();
        assert!(get_attachment(&db, id).await.unwrap().is_none());
        assert!(list_attachments(&db, request_id, false)
            .await
            .unwrap()
            .is_empty());

        let err = delete_attachment(&db, id).await.unwrap_err();
        assert!(matches!(err, ChairsideError::NotFound { .. }));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn attach_to_unknown_request_is_not_found() {
        let (db, _request_id, _dir) = setup_db_with_request().await;
        let err = add_attachment(&db, &make_attachment(55, "orphan.png", b"zz"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChairsideError::NotFound { .. }));
        db.close().await.unwrap();
    }
}
