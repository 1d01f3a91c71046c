//!
//! System wide errors, and re-export
//! [color_eyre::Report](https://docs.rs/eyre/0.6.8/eyre/struct.Report.html) for cleanliness.
//!

pub use color_eyre::eyre::eyre;
pub use color_eyre::Report;

use thiserror::Error;

///
/// Everything that can go wrong between opening a feed and handing a record to a sink.
///
#[derive(Debug, Error)]
pub enum StreamError {
    /// The transport could not be established, or not within the connect timeout.
    #[error("Failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    /// The transport is up but the subscription call was refused.
    #[error("Failed to subscribe to stream: {0}")]
    Subscribe(String),

    /// The live stream failed while waiting for the next message.
    #[error("An error occurred while receiving data: {0}")]
    Transport(String),

    /// The server closed the stream.
    #[error("Stream closed by the server")]
    EndOfStream,

    /// A payload was not a complete brotli stream.
    #[error("Failed to decompress payload: {0}")]
    Decode(String),

    /// Decompressed text was not a JSON object.
    #[error("Failed to parse record: {0}")]
    Parse(#[from] serde_json::Error),

    /// A WebSocket frame could not be read as a JSON-RPC envelope.
    #[error("Malformed envelope: {reason}. Raw data: {raw}")]
    Envelope { reason: String, raw: String },

    /// Transaction submission failed or timed out.
    #[error("Failed to send transaction: {0}")]
    Submit(String),

    /// A transaction blob could not be classified.
    #[error("Invalid transaction at index {index}: {reason}")]
    Transaction { index: usize, reason: String },

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StreamError {
    /// Returns `true` when the error ends the current stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. } | Self::Subscribe(_) | Self::Transport(_) | Self::EndOfStream
        )
    }

    /// Returns `true` for per-record errors the consumer logs and skips.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::Parse(_) | Self::Envelope { .. }
        )
    }

    pub(crate) fn connect(endpoint: impl ToString, reason: impl ToString) -> Self {
        Self::Connect {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}

///
/// Render an error together with its sources, e.g. `transport error: Connection refused`.
///
pub fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_str = cause.to_string();
        if !out.ends_with(&cause_str) {
            out.push_str(": ");
            out.push_str(&cause_str);
        }
        source = cause.source();
    }
    out
}

impl From<tonic::Status> for StreamError {
    fn from(status: tonic::Status) -> Self {
        Self::Transport(status.to_string())
    }
}
