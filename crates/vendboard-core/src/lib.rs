//! Page-side building blocks for the vendboard admin dashboard.
//!
//! - **[`Dashboard`]**: facade owning the document handle, the [`Toaster`],
//!   an [`ApiClient`](vendboard_api::ApiClient) that reports failures as
//!   toasts, and the [`AutoRefresh`] timer.
//!
//! - **[`dom`]**: the [`Dom`] port every renderer writes through, plus
//!   [`MemoryDom`], an in-process document tree.
//!
//! - **Renderers**: [`toast`], [`table`], [`form`], [`chart`] and
//!   [`widgets`] map data onto the document using Bootstrap class contracts.
//!
//! - **[`format`]**: pure formatters for timestamps, money, sizes,
//!   durations and device status badges.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dom;
pub mod error;
pub mod form;
pub mod format;
pub mod refresh;
pub mod table;
pub mod toast;
pub mod widgets;

// ── Primary re-exports ──────────────────────────────────────────────
pub use chart::{
    ChartConfig, ChartHandle, ChartKind, ChartLibrary, EmbeddedChartLibrary, create_chart,
};
pub use config::DashboardConfig;
pub use dashboard::{
    BINS_TABLE_ID, DEVICES_TABLE_ID, Dashboard, MATERIALS_TABLE_ID, ONLINE_RATE_CHART_ID,
    ORDERS_TABLE_ID, SALES_CHART_ID, bins_columns, devices_columns, materials_columns,
    orders_columns,
};
pub use dom::{Dom, MemoryDom, NodeId};
pub use error::CoreError;
pub use form::{clear_field_error, reset_form, serialize_form, show_field_error};
pub use format::{
    DeviceStatus, format_bytes, format_currency, format_duration, format_percentage,
    format_timestamp, get_last_seen_text, get_status_badge,
};
pub use refresh::{AutoRefresh, RefreshCallback, Visibility, VisibilityObserver, refresh_callback};
pub use table::{Column, TableOptions, create_data_table};
pub use toast::{TOAST_CONTAINER_ID, TOAST_DURATION, Toaster};
pub use widgets::{BootstrapWidgets, WidgetLibrary, hide_modal, init_tooltips, show_modal};
