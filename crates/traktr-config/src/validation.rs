// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as route syntax, storage key shape and the classifier priority list.

use std::collections::HashSet;

use traktr_core::Intent;

use crate::diagnostic::ConfigError;
use crate::model::TraktrConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TraktrConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    validate_storage(config, &mut errors);
    validate_gate(config, &mut errors);
    validate_classifier(config, &mut errors);
    validate_ai_gate(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation(message: String) -> ConfigError {
    ConfigError::Validation { message }
}

fn validate_storage(config: &TraktrConfig, errors: &mut Vec<ConfigError>) {
    let storage = &config.storage;

    if storage.database_path.trim().is_empty() {
        errors.push(validation(
            "storage.database_path must not be empty".to_string(),
        ));
    }

    let keys = [
        ("session_key", &storage.session_key),
        ("accent_key", &storage.accent_key),
        ("chat_key_prefix", &storage.chat_key_prefix),
        ("chat_fallback_key", &storage.chat_fallback_key),
    ];
    for (name, value) in keys {
        if value.trim().is_empty() {
            errors.push(validation(format!("storage.{name} must not be empty")));
        }
    }

    // The session and accent records would overwrite each other.
    if storage.session_key == storage.accent_key {
        errors.push(validation(format!(
            "storage.session_key and storage.accent_key must differ, both are `{}`",
            storage.session_key
        )));
    }
}

fn validate_gate(config: &TraktrConfig, errors: &mut Vec<ConfigError>) {
    let gate = &config.gate;

    for (i, route) in gate.public_routes.iter().enumerate() {
        if !route.starts_with('/') {
            errors.push(validation(format!(
                "gate.public_routes[{i}] `{route}` must start with `/`"
            )));
        }
    }

    let routes = [
        ("join_route", &gate.join_route),
        ("home_route", &gate.home_route),
        ("job_create_route", &gate.job_create_route),
    ];
    for (name, route) in routes {
        if !route.starts_with('/') {
            errors.push(validation(format!(
                "gate.{name} `{route}` must start with `/`"
            )));
        }
    }

    if gate.home_route == gate.job_create_route {
        errors.push(validation(
            "gate.home_route must differ from gate.job_create_route".to_string(),
        ));
    }
}

fn validate_classifier(config: &TraktrConfig, errors: &mut Vec<ConfigError>) {
    let classifier = &config.classifier;

    let mut seen = HashSet::new();
    for intent in &classifier.priority {
        if *intent == Intent::Other {
            errors.push(validation(
                "classifier.priority must not contain `other`; it is the default".to_string(),
            ));
        } else if !seen.insert(*intent) {
            errors.push(validation(format!(
                "duplicate `{intent}` in classifier.priority"
            )));
        }
    }
    for intent in [Intent::Materials, Intent::Issue, Intent::Progress] {
        if !classifier.priority.contains(&intent) {
            errors.push(validation(format!(
                "classifier.priority is missing `{intent}`"
            )));
        }
    }

    for intent in [Intent::Materials, Intent::Issue, Intent::Progress] {
        if classifier
            .keywords_for(intent)
            .iter()
            .any(|k| k.trim().is_empty())
        {
            errors.push(validation(format!(
                "classifier.{intent} contains an empty keyword"
            )));
        }
    }
}

fn validate_ai_gate(config: &TraktrConfig, errors: &mut Vec<ConfigError>) {
    let ai_gate = &config.ai_gate;

    let url = ai_gate.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(validation(format!(
            "ai_gate.base_url `{url}` must be an http:// or https:// URL"
        )));
    }

    if ai_gate.timeout_secs == Some(0) {
        errors.push(validation(
            "ai_gate.timeout_secs must be at least 1 when set".to_string(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = TraktrConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = TraktrConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "database_path"));
    }

    #[test]
    fn colliding_session_and_accent_keys_fail() {
        let mut config = TraktrConfig::default();
        config.storage.accent_key = config.storage.session_key.clone();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "must differ"));
    }

    #[test]
    fn relative_routes_fail_validation() {
        let mut config = TraktrConfig::default();
        config.gate.join_route = "join-company".to_string();
        config.gate.public_routes.push("login2".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "gate.join_route"));
        assert!(has_error(&errors, "gate.public_routes[5]"));
    }

    #[test]
    fn priority_must_be_a_permutation() {
        let mut config = TraktrConfig::default();
        config.classifier.priority = vec![Intent::Issue, Intent::Issue, Intent::Other];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "duplicate `issue`"));
        assert!(has_error(&errors, "must not contain `other`"));
        assert!(has_error(&errors, "missing `materials`"));
        assert!(has_error(&errors, "missing `progress`"));
    }

    #[test]
    fn empty_keyword_fails_validation() {
        let mut config = TraktrConfig::default();
        config.classifier.progress.push("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "classifier.progress"));
    }

    #[test]
    fn base_url_must_be_http() {
        let mut config = TraktrConfig::default();
        config.ai_gate.base_url = "ftp://gate.example.com".to_string();
        config.ai_gate.timeout_secs = Some(0);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = TraktrConfig::default();
        config.storage.session_key = "".to_string();
        config.gate.home_route = "home".to_string();
        config.ai_gate.base_url = "nope".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
