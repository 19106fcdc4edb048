// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/JSON gateway for the Chairside request API.
//!
//! Every route follows the same shape: parse and validate input, call one
//! store operation, wrap the result in the `{data}`/`{error}` envelope.
//! Cross-cutting concerns (CORS, request tracing, body limits) are applied
//! once as router layers, never per handler.

pub mod cors;
pub mod handlers;
pub mod responses;
pub mod server;

pub use server::{build_router, start_server, AppState, RequestLimits, ServerConfig};
