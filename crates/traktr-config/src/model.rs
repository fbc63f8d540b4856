// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Traktr client core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use traktr_core::Intent;

/// Top-level Traktr configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TraktrConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Local key-value storage and the keys it uses.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session gate routes.
    #[serde(default)]
    pub gate: GateConfig,

    /// Intent classifier keyword rules.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Remote AI rewrite endpoint.
    #[serde(default)]
    pub ai_gate: AiGateConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name used in log lines.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "traktr".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite file backing the key-value store.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Key holding the cached session record.
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Key holding the accent colour preference.
    #[serde(default = "default_accent_key")]
    pub accent_key: String,

    /// Prefix of per-job chat keys (`{prefix}_{job_id}`).
    #[serde(default = "default_chat_key_prefix")]
    pub chat_key_prefix: String,

    /// Chat key used when no job id is supplied.
    #[serde(default = "default_chat_fallback_key")]
    pub chat_fallback_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            session_key: default_session_key(),
            accent_key: default_accent_key(),
            chat_key_prefix: default_chat_key_prefix(),
            chat_fallback_key: default_chat_fallback_key(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("traktr").join("traktr.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("traktr.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_session_key() -> String {
    "traktr_session".to_string()
}

fn default_accent_key() -> String {
    "traktr_accent".to_string()
}

fn default_chat_key_prefix() -> String {
    "job_chat".to_string()
}

fn default_chat_fallback_key() -> String {
    "job_chat_general".to_string()
}

/// Route configuration for the session gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Routes reachable without a session. `/` matches only itself; every
    /// other entry also covers its sub-paths.
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,

    /// Where employees without a company are sent.
    #[serde(default = "default_join_route")]
    pub join_route: String,

    /// Landing route after sign-in.
    #[serde(default = "default_home_route")]
    pub home_route: String,

    /// Job creation route, closed to employees.
    #[serde(default = "default_job_create_route")]
    pub job_create_route: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            public_routes: default_public_routes(),
            join_route: default_join_route(),
            home_route: default_home_route(),
            job_create_route: default_job_create_route(),
        }
    }
}

fn default_public_routes() -> Vec<String> {
    ["/", "/login", "/signup", "/forgot-password", "/join-company"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_join_route() -> String {
    "/join-company".to_string()
}

fn default_home_route() -> String {
    "/home".to_string()
}

fn default_job_create_route() -> String {
    "/jobs/create".to_string()
}

/// Keyword rules for the intent classifier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Order in which keyword lists are checked; first match wins.
    #[serde(default = "default_priority")]
    pub priority: Vec<Intent>,

    /// Keywords for materials requests.
    #[serde(default = "default_materials_keywords")]
    pub materials: Vec<String>,

    /// Keywords for problems on site.
    #[serde(default = "default_issue_keywords")]
    pub issue: Vec<String>,

    /// Keywords for progress updates.
    #[serde(default = "default_progress_keywords")]
    pub progress: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            materials: default_materials_keywords(),
            issue: default_issue_keywords(),
            progress: default_progress_keywords(),
        }
    }
}

impl ClassifierConfig {
    /// Keyword list for `intent`. `Other` has none.
    pub fn keywords_for(&self, intent: Intent) -> &[String] {
        match intent {
            Intent::Materials => &self.materials,
            Intent::Issue => &self.issue,
            Intent::Progress => &self.progress,
            Intent::Other => &[],
        }
    }
}

fn default_priority() -> Vec<Intent> {
    vec![Intent::Materials, Intent::Issue, Intent::Progress]
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

// Must not contain "breaker": "breaker tripping" belongs to the issue list.
fn default_materials_keywords() -> Vec<String> {
    words(&[
        "need more",
        "materials",
        "material",
        "wire",
        "conduit",
        "supplies",
        "parts",
        "order",
        "fittings",
        "pick up",
        "run out",
        "ran out",
        "out of",
        "box of",
        "spool",
    ])
}

fn default_issue_keywords() -> Vec<String> {
    words(&[
        "no power",
        "tripping",
        "tripped",
        "issue",
        "problem",
        "broken",
        "fault",
        "not working",
        "won't",
        "can't",
        "cannot",
        "leak",
        "sparking",
        "burning",
        "smoke",
        "delay",
        "stuck",
        "damaged",
        "failed",
        "inspection failed",
    ])
}

fn default_progress_keywords() -> Vec<String> {
    words(&[
        "finished",
        "done",
        "complete",
        "completed",
        "installed",
        "progress",
        "wrapped up",
        "started",
        "mounted",
        "roughed in",
        "passed",
        "on site",
    ])
}

/// Remote AI rewrite endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AiGateConfig {
    /// When false, previews always come from the local rewrite.
    #[serde(default = "default_ai_gate_enabled")]
    pub enabled: bool,

    /// Base URL; requests go to `{base_url}/ai-gate`.
    #[serde(default = "default_ai_gate_base_url")]
    pub base_url: String,

    /// Request timeout. `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AiGateConfig {
    fn default() -> Self {
        Self {
            enabled: default_ai_gate_enabled(),
            base_url: default_ai_gate_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_ai_gate_enabled() -> bool {
    true
}

fn default_ai_gate_base_url() -> String {
    "http://127.0.0.1:8787".to_string()
}
