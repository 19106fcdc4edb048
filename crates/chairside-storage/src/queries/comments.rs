// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comment operations: append-only, ordered by creation time.

use chairside_core::ChairsideError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Comment, NewComment};

/// Append a comment. Returns the auto-generated id.
///
/// The referenced request must exist; the existence check and the insert run
/// in the same serialized call, so the request cannot vanish in between.
pub async fn add_comment(db: &Database, comment: &NewComment) -> Result<i64, ChairsideError> {
    let comment = comment.clone();
    let id = db
        .connection()
        .call(move |conn| {
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM requests WHERE id = ?1)",
                params![comment.request_id],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Ok(None);
            }
            conn.execute(
                "INSERT INTO request_comments (request_id, comment_text, created_by, created_at)
                 VALUES (?1, ?2, ?3, strftime('%Y-%m-%dT%H:%M:%fZ','now'))",
                params![comment.request_id, comment.comment_text, comment.created_by],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    id.ok_or_else(|| ChairsideError::not_found("request"))
}

/// List a request's comments in chronological order.
///
/// An unknown request id yields an empty list, not an error.
pub async fn list_comments(db: &Database, request_id: i64) -> Result<Vec<Comment>, ChairsideError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, request_id, comment_text, created_by, created_at
                 FROM request_comments WHERE request_id = ?1
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![request_id], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    request_id: row.get(1)?,
                    comment_text: row.get(2)?,
                    created_by: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut comments = Vec::new();
            for row in rows {
                comments.push(row?);
            }
            Ok(comments)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a comment by id. Fails with `NotFound` when absent.
pub async fn delete_comment(db: &Database, id: i64) -> Result<(), ChairsideError> {
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute("DELETE FROM request_comments WHERE id = ?1", params![id])
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if affected == 0 {
        return Err(ChairsideError::not_found("comment"));
    }
    Ok(())
}
