// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./traktr.toml` > `~/.config/traktr/traktr.toml` > `/etc/traktr/traktr.toml`
//! with environment variable overrides via `TRAKTR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TraktrConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/traktr/traktr.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "traktr.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/traktr/traktr.toml` (system-wide)
/// 3. `~/.config/traktr/traktr.toml` (user XDG config)
/// 4. `./traktr.toml` (local directory)
/// 5. `TRAKTR_*` environment variables
pub fn load_config() -> Result<TraktrConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TraktrConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TraktrConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TraktrConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TraktrConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TraktrConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Path of the per-user config file, when a config dir exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("traktr").join(LOCAL_CONFIG_FILE))
}

/// Environment provider with explicit section-to-dot mapping.
///
/// `Env::split("_")` would turn `TRAKTR_STORAGE_SESSION_KEY` into
/// `storage.session.key`; only the first underscore after a known section
/// name is a separator.
fn env_provider() -> Env {
    Env::prefixed("TRAKTR_").map(|key| {
        // Figment hands over the key with its original (upper) case.
        let key = key.as_str().to_ascii_lowercase();
        map_env_key(&key).into()
    })
}

fn map_env_key(key: &str) -> String {
    const SECTIONS: &[&str] = &["app", "storage", "gate", "classifier", "ai_gate"];

    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("app_log_level"), "app.log_level");
        assert_eq!(map_env_key("storage_session_key"), "storage.session_key");
        assert_eq!(map_env_key("ai_gate_base_url"), "ai_gate.base_url");
        assert_eq!(map_env_key("gate_home_route"), "gate.home_route");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }

    #[test]
    fn uppercase_env_vars_reach_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("empty.toml", "")?;
            jail.set_env("TRAKTR_STORAGE_SESSION_KEY", "alt_session");
            jail.set_env("TRAKTR_GATE_HOME_ROUTE", "/dashboard");

            let config = load_config_from_path(Path::new("empty.toml"))?;
            assert_eq!(config.storage.session_key, "alt_session");
            assert_eq!(config.gate.home_route, "/dashboard");
            Ok(())
        });
    }

    #[test]
    fn env_override_applies_over_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[ai_gate]
base_url = "https://file.example.com"
"#,
            )?;
            jail.set_env("TRAKTR_AI_GATE_BASE_URL", "https://env.example.com");
            jail.set_env("TRAKTR_APP_LOG_LEVEL", "debug");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.ai_gate.base_url, "https://env.example.com");
            assert_eq!(config.app.log_level, "debug");
            Ok(())
        });
    }
}
