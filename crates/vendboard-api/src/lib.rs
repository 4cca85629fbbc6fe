// vendboard-api: Async Rust client for the vendboard admin API

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod notify;
pub mod transport;

pub use client::{ApiClient, RequestOptions};
pub use endpoints::{DeviceQuery, OrderQuery, SummaryQuery};
pub use error::Error;
pub use models::{
    BinConfig, DashboardSummary, Device, DeviceBin, DeviceList, Envelope, Health, Material,
    MaterialCatalog, MaterialUpdate, Message, NewMaterial, Order, OrderList, OrderStatistics,
    Pagination, TrendPoint, Trends,
};
pub use notify::{Notifier, Severity, TracingNotifier};
pub use transport::TransportConfig;
