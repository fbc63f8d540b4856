// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the `POST /ai-gate` rewrite endpoint.

use serde::{Deserialize, Serialize};

/// Body of a rewrite request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiGateRequest {
    /// The draft chat message as typed.
    pub message: String,
    pub job_title: String,
    pub job_id: String,
}

impl AiGateRequest {
    pub fn new(
        message: impl Into<String>,
        job_title: impl Into<String>,
        job_id: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            job_title: job_title.into(),
            job_id: job_id.into(),
        }
    }
}

/// Body of a rewrite response.
///
/// Only `ok == true` with a non-blank `previewText` counts as a usable
/// rewrite.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiGateResponse {
    pub ok: bool,
    #[serde(default)]
    pub preview_text: Option<String>,
}

impl AiGateResponse {
    /// The rewritten text, if the response carries a usable one.
    pub fn into_preview(self) -> Option<String> {
        if !self.ok {
            return None;
        }
        self.preview_text.filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case() {
        let req = AiGateRequest::new("need wire", "Panel swap", "j1");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "need wire", "jobTitle": "Panel swap", "jobId": "j1"})
        );
    }

    #[test]
    fn only_ok_with_text_is_usable() {
        let parse = |s: &str| serde_json::from_str::<AiGateResponse>(s).unwrap().into_preview();
        assert_eq!(
            parse(r#"{"ok":true,"previewText":"Need more wire."}"#).as_deref(),
            Some("Need more wire.")
        );
        assert_eq!(parse(r#"{"ok":false,"previewText":"x"}"#), None);
        assert_eq!(parse(r#"{"ok":true,"previewText":"  "}"#), None);
        assert_eq!(parse(r#"{"ok":true}"#), None);
    }
}
