// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft message preview: remote rewrite first, local rewrite on failure.
//!
//! A preview always has text and an intent. The intent is computed locally
//! from the preview text, whichever path produced it. Concurrent previews
//! for the same draft are independent requests.

use serde::Serialize;
use strum::Display;
use tracing::{debug, warn};
use traktr_config::model::AiGateConfig;
use traktr_core::{Intent, TraktrError};
use traktr_router::IntentClassifier;

use crate::client::AiGateClient;
use crate::fallback::local_rewrite;
use crate::types::AiGateRequest;

/// Shown next to a preview built by the local rewrite after a remote failure.
pub const FALLBACK_NOTICE: &str =
    "AI rewrite is unavailable right now. Showing a basic cleanup instead.";

/// Where a preview's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PreviewSource {
    Remote,
    LocalFallback,
}

/// A rewritten draft ready to show before sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub text: String,
    pub intent: Intent,
    pub source: PreviewSource,
    /// User-visible notice, set when the remote rewrite failed.
    pub notice: Option<String>,
}

/// Produces previews for chat drafts.
#[derive(Debug, Clone)]
pub struct PreviewService {
    /// `None` when the AI gate is disabled.
    client: Option<AiGateClient>,
    classifier: IntentClassifier,
}

impl PreviewService {
    pub fn new(config: &AiGateConfig, classifier: IntentClassifier) -> Result<Self, TraktrError> {
        let client = if config.enabled {
            Some(AiGateClient::new(config)?)
        } else {
            None
        };
        Ok(Self { client, classifier })
    }

    /// Builds a preview for `request`. Never fails.
    pub async fn preview(&self, request: &AiGateRequest) -> Preview {
        let Some(client) = &self.client else {
            debug!(job_id = %request.job_id, "ai gate disabled, using local rewrite");
            return self.local(request, None);
        };

        match client.rewrite(request).await {
            Ok(text) => Preview {
                intent: self.classifier.classify(&text),
                text,
                source: PreviewSource::Remote,
                notice: None,
            },
            Err(e) => {
                warn!(
                    job_id = %request.job_id,
                    endpoint = client.endpoint(),
                    error = %e,
                    "ai gate failed, using local rewrite"
                );
                self.local(request, Some(FALLBACK_NOTICE.to_string()))
            }
        }
    }

    fn local(&self, request: &AiGateRequest, notice: Option<String>) -> Preview {
        let text = local_rewrite(&request.message);
        Preview {
            intent: self.classifier.classify(&text),
            text,
            source: PreviewSource::LocalFallback,
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(base_url: &str, enabled: bool) -> PreviewService {
        let config = AiGateConfig {
            enabled,
            base_url: base_url.to_string(),
            timeout_secs: Some(5),
        };
        PreviewService::new(&config, IntentClassifier::default()).unwrap()
    }

    #[tokio::test]
    async fn remote_preview_is_classified_locally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ai-gate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "previewText": "No power at the panel, breaker keeps tripping."
            })))
            .mount(&server)
            .await;

        let preview = service(&server.uri(), true)
            .preview(&AiGateRequest::new("no pwr breaker trip", "Panel", "j1"))
            .await;
        assert_eq!(preview.source, PreviewSource::Remote);
        assert_eq!(preview.intent, Intent::Issue);
        assert!(preview.notice.is_none());
    }

    #[tokio::test]
    async fn server_error_falls_back_with_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ai-gate"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let preview = service(&server.uri(), true)
            .preview(&AiGateRequest::new("need more wire pls", "Panel", "j1"))
            .await;
        assert_eq!(preview.source, PreviewSource::LocalFallback);
        assert_eq!(preview.text, "Need more wire please.");
        assert_eq!(preview.intent, Intent::Materials);
        assert_eq!(preview.notice.as_deref(), Some(FALLBACK_NOTICE));
    }

    #[tokio::test]
    async fn disabled_gate_skips_network_and_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let preview = service(&server.uri(), false)
            .preview(&AiGateRequest::new("finished rough in", "Panel", "j1"))
            .await;
        assert_eq!(preview.source, PreviewSource::LocalFallback);
        assert_eq!(preview.intent, Intent::Progress);
        assert!(preview.notice.is_none());
    }

    #[tokio::test]
    async fn blank_draft_still_previews() {
        let preview = service("http://127.0.0.1:9", false)
            .preview(&AiGateRequest::new("   ", "Panel", "j1"))
            .await;
        assert_eq!(preview.text, crate::fallback::EMPTY_PLACEHOLDER);
        assert_eq!(preview.intent, Intent::Other);
    }
}
