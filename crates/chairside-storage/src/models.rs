// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `chairside-core::types` for use across
//! the store trait boundary. This module re-exports them for convenience
//! within the storage crate.

pub use chairside_core::types::{
    Attachment, Comment, NewAttachment, NewComment, NewNotification, NewRoutingEntry,
    Notification, RoutingEntry, WorkRequest, WorkRequestDraft,
};
