// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the AI rewrite endpoint.
//!
//! One attempt per request. There is no retry and no backoff; every failure
//! is reported as [`TraktrError::Network`] and the caller falls back to the
//! local rewrite.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;
use traktr_config::model::AiGateConfig;
use traktr_core::TraktrError;

use crate::types::{AiGateRequest, AiGateResponse};

/// Path appended to the configured base URL.
const AI_GATE_PATH: &str = "/ai-gate";

/// HTTP client for `POST {base_url}/ai-gate`.
#[derive(Debug, Clone)]
pub struct AiGateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AiGateClient {
    /// Creates a client for the configured endpoint.
    pub fn new(config: &AiGateConfig) -> Result<Self, TraktrError> {
        let base = config.base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(base).map_err(|e| {
            TraktrError::Config(format!("ai_gate.base_url {base:?} is not a URL: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| TraktrError::Network {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            endpoint: format!("{base}{AI_GATE_PATH}"),
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Asks the endpoint to rewrite `request.message`.
    pub async fn rewrite(&self, request: &AiGateRequest) -> Result<String, TraktrError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TraktrError::Network {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, job_id = %request.job_id, "ai gate response received");

        let body = response.text().await.map_err(|e| TraktrError::Network {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(TraktrError::Network {
                message: format!("ai gate returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: AiGateResponse =
            serde_json::from_str(&body).map_err(|e| TraktrError::Network {
                message: format!("failed to parse ai gate response: {e}"),
                source: Some(Box::new(e)),
            })?;

        parsed.into_preview().ok_or_else(|| TraktrError::Network {
            message: "ai gate returned no usable preview".into(),
            source: None,
        })
    }
}
