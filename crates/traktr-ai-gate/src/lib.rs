// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat draft previews for Traktr.
//!
//! [`PreviewService`] sends drafts to the remote `POST /ai-gate` rewrite
//! endpoint through [`AiGateClient`] and falls back to [`local_rewrite`]
//! whenever the endpoint fails.

pub mod client;
pub mod fallback;
pub mod preview;
pub mod types;

pub use client::AiGateClient;
pub use fallback::local_rewrite;
pub use preview::{Preview, PreviewService, PreviewSource};
pub use types::{AiGateRequest, AiGateResponse};
