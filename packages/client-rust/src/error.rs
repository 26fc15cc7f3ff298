//! Error types shared by every operation in the crate.

use http::StatusCode;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by Folio API operations.
///
/// Streaming sequences carry the same type: a stream that fails mid-flight
/// ends with exactly one `Err` item built from one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP response: connect failure, broken
    /// connection, or a timeout inside the transport itself.
    #[error("transport: {0}")]
    Transport(#[from] anyhow::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        status: StatusCode,
        /// Server-provided error message, or the raw body when there is none.
        message: String,
    },

    /// A request body could not be serialized.
    #[error("encode {context}: {source}")]
    Encode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The operation observed caller cancellation (or an expired deadline)
    /// and stopped cooperatively.
    #[error("operation cancelled")]
    Cancelled,

    /// No capability is registered under the requested key.
    #[error("capability not registered: {key}")]
    CapabilityNotFound { key: String },

    /// A capability is registered under the key, but with a different
    /// concrete type than the caller asked for.
    #[error("capability {key}: requested {requested}, registered {registered}")]
    CapabilityMismatch {
        key: String,
        requested: &'static str,
        registered: &'static str,
    },
}

impl Error {
    pub(crate) fn encode(context: &'static str, source: serde_json::Error) -> Self {
        Error::Encode { context, source }
    }

    pub(crate) fn decode(context: &'static str, source: serde_json::Error) -> Self {
        Error::Decode { context, source }
    }

    /// Whether retrying the same call could plausibly succeed.
    ///
    /// Transport failures and server-side statuses (5xx, 429) are retryable;
    /// everything else is deterministic and retrying would not help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    /// Whether the operation stopped because the caller cancelled it.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
