// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./chairside.toml` > `~/.config/chairside/chairside.toml`
//! > `/etc/chairside/chairside.toml` with environment variable overrides via
//! the `CHAIRSIDE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ChairsideConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/chairside/chairside.toml` (system-wide)
/// 3. `~/.config/chairside/chairside.toml` (user XDG config)
/// 4. `./chairside.toml` (local directory)
/// 5. `CHAIRSIDE_*` environment variables
pub fn load_config() -> Result<ChairsideConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChairsideConfig::default()))
        .merge(Toml::file("/etc/chairside/chairside.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("chairside/chairside.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("chairside.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ChairsideConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChairsideConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ChairsideConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChairsideConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CHAIRSIDE_STORAGE_DATABASE_PATH` must
/// map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("CHAIRSIDE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: CHAIRSIDE_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("attachments_", "attachments.", 1)
            .replacen("notifications_", "notifications.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.service.name, "chairside");
        assert_eq!(config.gateway.port, 7171);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [gateway]
            host = "0.0.0.0"
            port = 8080

            [attachments]
            max_upload_bytes = 1048576
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.attachments.max_upload_bytes, 1_048_576);
        // Untouched sections keep their defaults.
        assert_eq!(config.notifications.default_page_size, 50);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let result = load_config_from_str(
            r#"
            [notifications]
            default_pagesize = 10
            "#,
        );
        assert!(result.is_err());
    }
}
