// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification fan-out operations.
//!
//! Rows are immutable after insert except for the `is_read`/`read_at` pair.

use chairside_core::ChairsideError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{NewNotification, Notification};

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get(0)?,
        request_id: row.get(1)?,
        to_user: row.get(2)?,
        from_user: row.get(3)?,
        notification_type: row.get(4)?,
        message: row.get(5)?,
        created_at: row.get(6)?,
        is_read: row.get::<_, i64>(7)? != 0,
        read_at: row.get(8)?,
    })
}

const SELECT_COLUMNS: &str = "id, request_id, to_user, from_user, notification_type, \
     message, created_at, is_read, read_at";

/// Create an unread notification. Returns the auto-generated id.
pub async fn notify(
    db: &Database,
    notification: &NewNotification,
) -> Result<i64, ChairsideError> {
    let notification = notification.clone();
    let id = db
        .connection()
        .call(move |conn| {
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM requests WHERE id = ?1)",
                params![notification.request_id],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Ok(None);
            }
            conn.execute(
                "INSERT INTO request_notifications
                     (request_id, to_user, from_user, notification_type, message,
                      created_at, is_read)
                 VALUES (?1, ?2, ?3, ?4, ?5, strftime('%Y-%m-%dT%H:%M:%fZ','now'), 0)",
                params![
                    notification.request_id,
                    notification.to_user,
                    notification.from_user,
                    notification.notification_type,
                    notification.message,
                ],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    id.ok_or_else(|| ChairsideError::not_found("request"))
}

/// List a recipient's notifications, newest first, capped at `limit`.
pub async fn list_notifications(
    db: &Database,
    to_user: &str,
    unread_only: bool,
    limit: i64,
) -> Result<Vec<Notification>, ChairsideError> {
    let to_user = to_user.to_string();
    db.connection()
        .call(move |conn| {
            let mut notifications = Vec::new();
            if unread_only {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM request_notifications
                     WHERE to_user = ?1 AND is_read = 0
                     ORDER BY created_at DESC, id DESC LIMIT ?2"
                ))?;
                let rows = stmt.query_map(params![to_user, limit], map_row)?;
                for row in rows {
                    notifications.push(row?);
                }
            } else {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM request_notifications
                     WHERE to_user = ?1
                     ORDER BY created_at DESC, id DESC LIMIT ?2"
                ))?;
                let rows = stmt.query_map(params![to_user, limit], map_row)?;
                for row in rows {
                    notifications.push(row?);
                }
            }
            Ok(notifications)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count a recipient's unread notifications.
pub async fn unread_count(db: &Database, to_user: &str) -> Result<i64, ChairsideError> {
    let to_user = to_user.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM request_notifications
                 WHERE to_user = ?1 AND is_read = 0",
                params![to_user],
                |row| row.get(0),
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark one notification read.
///
/// Idempotent: the UPDATE is guarded by `is_read = 0`, so a second call
/// leaves `read_at` at its original value. Unknown ids fail with `NotFound`.
pub async fn mark_read(db: &Database, id: i64) -> Result<(), ChairsideError> {
    let found = db
        .connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE request_notifications
                 SET is_read = 1, read_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
                 WHERE id = ?1 AND is_read = 0",
                params![id],
            )?;
            if updated > 0 {
                return Ok(true);
            }
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM request_notifications WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )?;
            Ok(exists != 0)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if !found {
        return Err(ChairsideError::not_found("notification"));
    }
    Ok(())
}

/// Mark every unread notification for `to_user` read.
///
/// Returns the number of rows flipped; other recipients are untouched.
pub async fn mark_all_read(db: &Database, to_user: &str) -> Result<u64, ChairsideError> {
    let to_user = to_user.to_string();
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE request_notifications
                 SET is_read = 1, read_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
                 WHERE to_user = ?1 AND is_read = 0",
                params![to_user],
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(affected as u64)
}
