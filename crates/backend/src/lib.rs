//! Generation backend for iterthought — the Ollama-protocol client.
//!
//! One [`OllamaClient::generate`] call issues a single POST to the
//! backend's `/api/generate` endpoint, drains the streamed NDJSON
//! response through [`StreamDecoder`], and returns the accumulated text.
//! Transient transport failures are retried with bounded exponential
//! backoff; API rejections are not.
//!
//! [`OllamaClient::generate`]: iterthought_core::Generator::generate

pub mod decode;
pub mod ollama;
pub mod retry;

pub use decode::StreamDecoder;
pub use ollama::{OllamaClient, GENERATION_FAILED};
pub use retry::RetryPolicy;
