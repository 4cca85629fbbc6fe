// Wire types returned by the admin API.
//
// Every endpoint wraps its payload as `{ "ok": bool, "data": ..., "error": {...} }`.
// Fields default liberally: demo-mode servers omit most of them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Standard `{ ok, data, error }` response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
}

/// Server error detail: `{ "code": "...", "message": "..." }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// `GET /health`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub version: String,
}

/// A vending device as listed by `GET /devices`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Device {
    pub device_id: String,
    pub merchant_id: Option<String>,
    pub alias: String,
    pub model: String,
    pub fw_version: String,
    /// One of `online`, `offline`, `maintenance`, `error`.
    pub status: String,
    pub last_seen_ts: Option<i64>,
    pub ip: String,
    pub wifi_ssid: String,
    pub temperature: Option<f64>,
    pub today_orders: Option<u64>,
    pub today_revenue_cents: Option<i64>,
    pub low_materials_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub has_more: bool,
}

/// `data` payload of `GET /devices`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceList {
    pub devices: Vec<Device>,
    pub pagination: Pagination,
}

/// `data` payload of `GET /dashboard/summary`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub device_total: u64,
    /// Percentage, already scaled (e.g. `87.5`).
    pub online_rate: f64,
    /// Revenue in cents.
    pub sales_today: i64,
    /// Revenue in cents.
    pub sales_week: i64,
    pub alarms_open: u64,
    pub materials_low: u64,
    /// Missing or malformed series decode as empty.
    #[serde(deserialize_with = "lenient")]
    pub trends: Trends,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Seven-day series attached to the summary, oldest day first.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Trends {
    /// Daily revenue in cents.
    pub sales: Vec<TrendPoint>,
    /// Daily online percentage.
    pub online_rate: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrendPoint {
    /// Day key, `YYYYMMDD`.
    pub date: String,
    pub value: f64,
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Order {
    pub order_id: String,
    pub device_id: String,
    pub customer_id: Option<String>,
    pub items: Vec<Value>,
    pub total_amount_cents: i64,
    pub currency: String,
    pub payment_method: String,
    /// `paid`, `unpaid`, `refunded`, ...
    pub payment_status: String,
    /// `completed`, `cancelled`, ...
    pub order_status: String,
    pub notes: Option<String>,
    pub created_ts: Option<i64>,
    pub updated_ts: Option<i64>,
    pub completed_ts: Option<i64>,
}

/// Aggregates over the returned page of orders.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderStatistics {
    pub total_orders: u64,
    pub total_revenue_cents: i64,
    pub avg_order_value_cents: i64,
    /// Percentage of completed orders.
    pub success_rate: f64,
}

/// `data` payload of `GET /orders`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderList {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
    pub statistics: OrderStatistics,
}

// ── Materials ────────────────────────────────────────────────────────

/// Entry of the material dictionary.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Material {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub unit: String,
    pub enabled: bool,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub cost_per_unit_cents: Option<i64>,
}

/// `data` payload of `GET /materials`, keyed by material code.
pub type MaterialCatalog = BTreeMap<String, Material>;

/// Body of `POST /materials`. The server defaults `type` to `other` and
/// `unit` to `g`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewMaterial {
    pub code: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Body of `PUT /materials/{code}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Material bin of one device.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceBin {
    pub device_id: String,
    pub bin_index: u32,
    pub material_code: String,
    pub material_name: String,
    pub remaining: f64,
    pub capacity: f64,
    pub unit: String,
    pub threshold_low_pct: f64,
    pub fill_percentage: f64,
    pub is_low: bool,
    pub is_empty: bool,
    pub last_sync_ts: Option<i64>,
}

/// One entry of a `PUT /devices/{id}/bins` request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BinConfig {
    pub bin_index: u32,
    #[serde(default)]
    pub material_code: String,
    #[serde(default)]
    pub remaining: f64,
    #[serde(default)]
    pub capacity: f64,
    #[serde(default = "default_threshold_low_pct")]
    pub threshold_low_pct: f64,
}

fn default_threshold_low_pct() -> f64 {
    20.0
}

/// Acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Message {
    pub message: String,
}
