// ── Runtime dashboard configuration ──
//
// Resolved settings handed to the `Dashboard`. Core never reads config
// files; the binary builds this from `vendboard-config` and passes it in.

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api/v1";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(30_000);
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Prefix for every endpoint, without a trailing slash.
    pub api_base: String,
    /// Auto-refresh period.
    pub refresh_interval: Duration,
    pub default_page_size: u32,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            default_page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl DashboardConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }
}
