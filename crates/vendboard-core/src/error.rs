// ── Core error types ──
//
// Errors surfaced by the dashboard layer. Request failures have already
// been logged and toasted by the API client by the time they get here; the
// `From` impl only sorts them into coarser buckets for callers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Server rejected the request; `message` is the server's own text.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    #[error("Unexpected response: {message}")]
    InvalidResponse { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from API errors ───────────────────────────────────────

impl From<vendboard_api::Error> for CoreError {
    fn from(err: vendboard_api::Error) -> Self {
        use vendboard_api::Error as ApiError;

        match err {
            ApiError::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            ApiError::Api {
                status: 404,
                message,
            } => CoreError::NotFound { message },
            ApiError::Api {
                status: 409,
                message,
            } => CoreError::Conflict { message },
            ApiError::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            ApiError::Parse { message, body: _ } => CoreError::InvalidResponse { message },
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Encode(e) => CoreError::Api {
                message: format!("Could not encode request body: {e}"),
                status: None,
            },
            ApiError::Client(message) => CoreError::Config { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_server_message() {
        let err: CoreError = vendboard_api::Error::Api {
            status: 400,
            message: "device busy".into(),
        }
        .into();
        assert_eq!(err.to_string(), "device busy");
    }

    #[test]
    fn not_found_is_its_own_variant() {
        let err: CoreError = vendboard_api::Error::Api {
            status: 404,
            message: "bad id".into(),
        }
        .into();
        assert!(matches!(err, CoreError::NotFound { ref message } if message == "bad id"));
    }

    #[test]
    fn conflict_is_its_own_variant() {
        let err: CoreError = vendboard_api::Error::Api {
            status: 409,
            message: "Material code already exists".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Conflict { .. }));
        assert_eq!(err.to_string(), "Conflict: Material code already exists");
    }
}
