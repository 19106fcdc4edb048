// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and coherent
//! page-size bounds.

use crate::diagnostic::ConfigError;
use crate::model::ChairsideConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ChairsideConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let addr = config.gateway.host.trim();
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.attachments.max_upload_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "attachments.max_upload_bytes must be greater than zero".to_string(),
        });
    }

    if config.notifications.default_page_size < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "notifications.default_page_size must be at least 1, got {}",
                config.notifications.default_page_size
            ),
        });
    }

    if config.notifications.max_page_size < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "notifications.max_page_size must be at least 1, got {}",
                config.notifications.max_page_size
            ),
        });
    }

    if config.notifications.default_page_size > config.notifications.max_page_size {
        errors.push(ConfigError::Validation {
            message: format!(
                "notifications.default_page_size ({}) must not exceed max_page_size ({})",
                config.notifications.default_page_size, config.notifications.max_page_size
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ChairsideConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_host_is_rejected() {
        let mut config = ChairsideConfig::default();
        config.gateway.host = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("gateway.host")));
    }

    #[test]
    fn zero_upload_ceiling_is_rejected() {
        let mut config = ChairsideConfig::default();
        config.attachments.max_upload_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("max_upload_bytes")));
    }

    #[test]
    fn incoherent_page_sizes_are_rejected() {
        let mut config = ChairsideConfig::default();
        config.notifications.default_page_size = 500;
        config.notifications.max_page_size = 200;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("default_page_size")));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = ChairsideConfig::default();
        config.gateway.host = "".to_string();
        config.storage.database_path = "".to_string();
        config.attachments.max_upload_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
