use thiserror::Error;

/// Message used when a failed response carries no server-supplied reason.
pub const GENERIC_API_FAILURE: &str = "API request failed";

/// Top-level error type for the `vendboard-api` crate.
///
/// Every variant is caught at the request-client boundary, logged, surfaced
/// through the [`Notifier`](crate::Notifier) and then handed back to the
/// caller. Nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Network-level failure (connection refused, DNS, timeout, body read).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The configured API base plus endpoint did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Response body was not valid JSON, or did not match the expected shape.
    #[error("Invalid response body: {message}")]
    Parse { message: String, body: String },

    /// Request body could not be serialized.
    #[error("Invalid request body: {0}")]
    Encode(#[source] serde_json::Error),

    // ── API ─────────────────────────────────────────────────────────
    /// Well-formed response with a non-success status. The message is the
    /// server's `error.message`, or [`GENERIC_API_FAILURE`].
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for connection-level failures (nothing reached the server
    /// or no response came back).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
