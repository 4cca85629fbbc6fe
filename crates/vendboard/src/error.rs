//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use vendboard_config::ConfigError;
use vendboard_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API at {url}")]
    #[diagnostic(
        code(vendboard::connection_failed),
        help(
            "Check that the admin API is running.\n\
             Reason: {reason}\n\
             Override the address with --api-base or VENDBOARD_API_BASE."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(code(vendboard::not_found))]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    #[diagnostic(code(vendboard::conflict))]
    Conflict { message: String },

    #[error("{message}")]
    #[diagnostic(code(vendboard::api_error))]
    Api { message: String },

    #[error("Unexpected response from API: {message}")]
    #[diagnostic(
        code(vendboard::invalid_response),
        help("Is --api-base pointing at the admin API prefix (e.g. /api/v1)?")
    )]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vendboard::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(vendboard::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(vendboard::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ConfigExists { .. } | Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::NotFound { message } => Self::NotFound { message },
            CoreError::Conflict { message } => Self::Conflict { message },
            CoreError::Api { message, .. } => Self::Api { message },
            CoreError::InvalidResponse { message } => Self::InvalidResponse { message },
            CoreError::Config { message } => Self::Validation {
                field: "api_base".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}
