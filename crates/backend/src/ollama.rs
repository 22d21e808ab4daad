//! Ollama-protocol client implementation.
//!
//! Speaks the native `/api/generate` endpoint: one POST with
//! `{"model", "prompt"}`, response streamed back as newline-delimited
//! JSON objects. The whole stream is drained before returning; there is
//! no mid-stream cancellation path.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use iterthought_config::BackendConfig;
use iterthought_core::error::BackendError;
use iterthought_core::generator::{DecodeOutcome, GenerationRequest, Generator};
use tracing::{debug, warn};

use crate::decode::StreamDecoder;
use crate::retry::{retry_transient, RetryPolicy};

/// Substituted when a fully drained stream yielded no text at all.
pub const GENERATION_FAILED: &str = "Error generating response.";

/// A streaming client for an Ollama-protocol generation endpoint.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl OllamaClient {
    /// Create a new client with the default retry policy.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build a client from the backend configuration section.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.url, Duration::from_secs(config.timeout_secs)).with_retry(RetryPolicy {
            max_attempts: config.retry.max_attempts,
            base_backoff: Duration::from_millis(config.retry.base_backoff_ms),
        })
    }

    /// Issue one request and drain its stream through the decoder.
    async fn generate_once(
        &self,
        request: &GenerationRequest,
    ) -> Result<DecodeOutcome, BackendError> {
        let url = format!("{}/api/generate", self.base_url);

        debug!(model = %request.model, prompt_len = request.prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(map_transport_err)?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Backend returned error");
            return Err(BackendError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let mut decoder = StreamDecoder::new();
        let mut byte_stream = response.bytes_stream();

        while let Some(chunk_result) = byte_stream.next().await {
            let bytes =
                chunk_result.map_err(|e| BackendError::StreamInterrupted(e.to_string()))?;
            decoder.push_bytes(&bytes);
        }

        Ok(decoder.finish())
    }
}

/// Map reqwest send errors onto the backend taxonomy.
fn map_transport_err(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout(e.to_string())
    } else {
        BackendError::Network(e.to_string())
    }
}

/// Turn a drained decode outcome into the response text.
///
/// The sentinel is substituted once, after the whole stream is consumed,
/// and only when no text fragment was decoded at all.
fn finalize(outcome: DecodeOutcome) -> String {
    if outcome.skipped > 0 {
        debug!(
            skipped = outcome.skipped,
            "Stream contained malformed chunks"
        );
    }

    if outcome.is_empty() {
        return GENERATION_FAILED.to_string();
    }

    outcome.text
}

#[async_trait]
impl Generator for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, BackendError> {
        let outcome = retry_transient(&self.retry, || self.generate_once(&request)).await?;
        Ok(finalize(outcome))
    }
}
