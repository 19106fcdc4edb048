// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Chairside practice-management backend.
//!
//! This crate provides the error taxonomy, domain entity types, and the
//! [`PracticeStore`] trait that the HTTP gateway consumes. The storage crate
//! implements the trait; the gateway only ever sees the trait object.

pub mod error;
pub mod store;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ChairsideError;
pub use store::PracticeStore;
