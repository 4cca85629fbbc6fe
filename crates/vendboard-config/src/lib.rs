//! Configuration for the vendboard dashboard.
//!
//! A flat TOML file at the platform config path, overridable by
//! `VENDBOARD_*` environment variables, validated and translated into
//! `vendboard_core::DashboardConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use vendboard_core::DashboardConfig;
use vendboard_core::config::{
    DEFAULT_API_BASE, DEFAULT_PAGE_SIZE, DEFAULT_REFRESH_INTERVAL, DEFAULT_REQUEST_TIMEOUT,
};

/// Prefix for environment overrides (`VENDBOARD_API_BASE`, ...).
pub const ENV_PREFIX: &str = "VENDBOARD_";

pub const MAX_PAGE_SIZE: u32 = 100;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// API prefix, e.g. `http://127.0.0.1:5000/api/v1`.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            refresh_interval_ms: default_refresh_interval_ms(),
            default_page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_millis() as u64
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

impl Config {
    /// Check every field; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base.trim();
        if base.is_empty() {
            return Err(invalid("api_base", "must not be empty"));
        }
        let url = url::Url::parse(base).map_err(|e| invalid("api_base", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "api_base",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.refresh_interval_ms == 0 {
            return Err(invalid("refresh_interval_ms", "must be greater than 0"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.default_page_size) {
            return Err(invalid(
                "default_page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be greater than 0"));
        }
        Ok(())
    }

    /// Runtime settings for `vendboard_core::Dashboard`.
    pub fn to_dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            refresh_interval: Duration::from_millis(self.refresh_interval_ms),
            default_page_size: self.default_page_size,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..DashboardConfig::default()
        }
        .with_api_base(self.api_base.trim())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vendboard", "vendboard").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("vendboard");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load and validate config from `path` plus environment.
///
/// A missing file is not an error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config as TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with(f: impl FnOnce(&mut Config)) -> Config {
        let mut cfg = Config::default();
        f(&mut cfg);
        cfg
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base, "http://127.0.0.1:5000/api/v1");
        assert_eq!(cfg.refresh_interval_ms, 30_000);
        assert_eq!(cfg.default_page_size, 20);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_fields() {
        let cases = [
            (with(|c| c.api_base = "  ".into()), "api_base"),
            (with(|c| c.api_base = "not a url".into()), "api_base"),
            (with(|c| c.api_base = "ftp://host/api".into()), "api_base"),
            (with(|c| c.refresh_interval_ms = 0), "refresh_interval_ms"),
            (with(|c| c.default_page_size = 0), "default_page_size"),
            (with(|c| c.default_page_size = 101), "default_page_size"),
            (with(|c| c.request_timeout_secs = 0), "request_timeout_secs"),
        ];
        for (cfg, expected) in cases {
            match cfg.validate() {
                Err(ConfigError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation error for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn converts_to_dashboard_config() {
        let cfg = with(|c| {
            c.api_base = "https://admin.example.com/api/v1/".into();
            c.refresh_interval_ms = 5000;
            c.default_page_size = 50;
        });
        let dash = cfg.to_dashboard_config();
        assert_eq!(dash.api_base, "https://admin.example.com/api/v1");
        assert_eq!(dash.refresh_interval, Duration::from_secs(5));
        assert_eq!(dash.default_page_size, 50);
        assert_eq!(dash.request_timeout, Duration::from_secs(30));
    }
}
