//! Incremental NDJSON stream decoding.
//!
//! The backend streams its response as newline-delimited JSON objects,
//! each optionally carrying a `response` field with a text fragment.
//! The decoder is line-buffered: bytes are appended as they arrive and
//! complete lines are split off and parsed. A line that fails parsing
//! is logged and skipped — decode failures never abort accumulation.

use iterthought_core::DecodeOutcome;
use serde::Deserialize;
use tracing::warn;

/// One NDJSON object from a streaming `/api/generate` response.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    /// Partial text fragment to append
    #[serde(default)]
    response: Option<String>,

    /// Whether this is the final chunk
    #[serde(default)]
    done: bool,
}

/// Assembles a streamed NDJSON response into its final text.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
    text: String,
    skipped: usize,
    done: bool,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes from the wire and process any complete lines.
    ///
    /// Bytes are buffered raw and only converted once a full line is
    /// available, so a multi-byte UTF-8 character split across network
    /// chunks reassembles intact.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);

        while let Some(line_end) = self.buffer.iter().position(|&b| b == b'\n') {
            let rest = self.buffer.split_off(line_end + 1);
            self.buffer.pop();
            let line = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer = rest;
            self.push_line(line.trim_end_matches('\r'));
        }
    }

    /// Process one complete line.
    ///
    /// Empty lines are skipped. Malformed lines emit one diagnostic and
    /// increment the skip counter.
    pub fn push_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        match serde_json::from_str::<GenerateChunk>(line) {
            Ok(chunk) => {
                if let Some(fragment) = chunk.response {
                    self.text.push_str(&fragment);
                }
                if chunk.done {
                    self.done = true;
                }
            }
            Err(e) => {
                warn!(line = %line, error = %e, "Failed to decode stream chunk, skipping");
                self.skipped += 1;
            }
        }
    }

    /// Whether a chunk with `"done": true` has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consume the decoder, flushing any final unterminated line.
    pub fn finish(mut self) -> DecodeOutcome {
        // The stream may end without a trailing newline
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&std::mem::take(&mut self.buffer)).into_owned();
            self.push_line(line.trim_end_matches('\r'));
        }

        DecodeOutcome {
            text: self.text,
            skipped: self.skipped,
        }
    }
}
