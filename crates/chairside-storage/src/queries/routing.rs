// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing log operations: the append-only hand-off history of a request.

use chairside_core::ChairsideError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{NewRoutingEntry, RoutingEntry};

/// Append a routing entry. Returns the auto-generated id.
///
/// Callers default `action` before reaching the store; the referenced
/// request must exist.
pub async fn log_routing(db: &Database, entry: &NewRoutingEntry) -> Result<i64, ChairsideError> {
    let entry = entry.clone();
    let id = db
        .connection()
        .call(move |conn| {
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM requests WHERE id = ?1)",
                params![entry.request_id],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Ok(None);
            }
            conn.execute(
                "INSERT INTO request_routing_log
                     (request_id, from_user, to_user, action, note, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, strftime('%Y-%m-%dT%H:%M:%fZ','now'))",
                params![
                    entry.request_id,
                    entry.from_user,
                    entry.to_user,
                    entry.action,
                    entry.note,
                ],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    id.ok_or_else(|| ChairsideError::not_found("request"))
}

/// List a request's routing history in chronological order.
pub async fn list_routing(
    db: &Database,
    request_id: i64,
) -> Result<Vec<RoutingEntry>, ChairsideError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, request_id, from_user, to_user, action, note, created_at
                 FROM request_routing_log WHERE request_id = ?1
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![request_id], |row| {
                Ok(RoutingEntry {
                    id: row.get(0)?,
                    request_id: row.get(1)?,
                    from_user: row.get(2)?,
                    to_user: row.get(3)?,
                    action: row.get(4)?,
                    note: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
