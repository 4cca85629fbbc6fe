// ── Dashboard facade ──
//
// Wires the pieces a page needs around one document: a toaster bound to
// the DOM, an API client that reports failures through that toaster, and
// the auto-refresh timer with its visibility observer. Cheap to clone.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tracing::debug;
use vendboard_api::{
    ApiClient, DashboardSummary, Device, DeviceBin, DeviceList, DeviceQuery, Material, Notifier,
    Order, OrderList, OrderQuery, Severity, SummaryQuery, TransportConfig, Trends,
};

use crate::chart::{ChartHandle, ChartKind, EmbeddedChartLibrary, create_chart};
use crate::config::DashboardConfig;
use crate::dom::{Dom, escape_html};
use crate::error::CoreError;
use crate::format::{
    format_currency, format_percentage, format_timestamp, get_last_seen_text, get_status_badge,
};
use crate::refresh::{AutoRefresh, RefreshCallback, VisibilityObserver};
use crate::table::{Column, TableOptions, create_data_table};
use crate::toast::Toaster;

/// Id of the device list table on the devices page.
pub const DEVICES_TABLE_ID: &str = "devices-table";
pub const ORDERS_TABLE_ID: &str = "orders-table";
pub const MATERIALS_TABLE_ID: &str = "materials-table";
pub const BINS_TABLE_ID: &str = "bins-table";

/// Canvas ids of the summary trend charts.
pub const SALES_CHART_ID: &str = "sales-chart";
pub const ONLINE_RATE_CHART_ID: &str = "online-rate-chart";

#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: Arc<DashboardConfig>,
    dom: Arc<dyn Dom>,
    toaster: Toaster,
    api: ApiClient,
    refresh: Arc<AutoRefresh>,
    visibility: Arc<VisibilityObserver>,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("config", &self.inner.config)
            .field("api", &self.inner.api)
            .field("refresh", &self.inner.refresh)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Build a dashboard over `dom`. Does no network I/O.
    pub fn new(config: DashboardConfig, dom: Arc<dyn Dom>) -> Result<Self, CoreError> {
        let toaster = Toaster::new(Arc::clone(&dom));
        let transport = TransportConfig::default()
            .with_timeout(config.request_timeout)
            .with_cookie_jar();
        let notifier: Arc<dyn Notifier> = Arc::new(toaster.clone());
        let api = ApiClient::new(config.api_base.clone(), &transport, notifier)?;

        let refresh = Arc::new(AutoRefresh::new(config.refresh_interval));
        let visibility = Arc::new(VisibilityObserver::new(Arc::clone(&refresh)));

        Ok(Self {
            inner: Arc::new(DashboardInner {
                config: Arc::new(config),
                dom,
                toaster,
                api,
                refresh,
                visibility,
            }),
        })
    }

    pub fn config(&self) -> &Arc<DashboardConfig> {
        &self.inner.config
    }

    pub fn dom(&self) -> &Arc<dyn Dom> {
        &self.inner.dom
    }

    pub fn toaster(&self) -> &Toaster {
        &self.inner.toaster
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn auto_refresh(&self) -> &Arc<AutoRefresh> {
        &self.inner.refresh
    }

    pub fn visibility(&self) -> &Arc<VisibilityObserver> {
        &self.inner.visibility
    }

    pub fn notify(&self, message: &str, severity: Severity) {
        self.inner.toaster.show_toast(message, severity);
    }

    // ── Page loaders ─────────────────────────────────────────────────

    /// Fetch one page of devices and render it into the devices table.
    ///
    /// The configured page size is used when the query leaves it unset.
    pub async fn load_devices(&self, query: &DeviceQuery) -> Result<DeviceList, CoreError> {
        let query = DeviceQuery {
            page_size: query.page_size.or(Some(self.inner.config.default_page_size)),
            ..query.clone()
        };

        let list = self.inner.api.list_devices(&query).await?;
        let rendered = create_data_table(
            self.inner.dom.as_ref(),
            DEVICES_TABLE_ID,
            &list.devices,
            &devices_columns(),
            &TableOptions::default(),
        );
        debug!(
            count = list.devices.len(),
            rendered = rendered.is_some(),
            "devices loaded"
        );
        Ok(list)
    }

    /// Fetch the KPI summary and draw its trend series.
    pub async fn load_summary(&self, query: &SummaryQuery) -> Result<DashboardSummary, CoreError> {
        let summary = self.inner.api.dashboard_summary(query).await?;
        let charts = self.render_trends(&summary.trends);
        debug!(charts = charts.len(), "summary loaded");
        Ok(summary)
    }

    /// Draw the sales and online-rate series on their canvases.
    ///
    /// Returns the charts that found a canvas.
    pub fn render_trends(&self, trends: &Trends) -> Vec<ChartHandle> {
        let dom = self.inner.dom.as_ref();
        let library = EmbeddedChartLibrary;

        let labels: Vec<&str> = trends.sales.iter().map(|p| p.date.as_str()).collect();
        let sales: Vec<f64> = trends.sales.iter().map(|p| p.value / 100.0).collect();
        let sales_chart = create_chart(
            dom,
            &library,
            SALES_CHART_ID,
            ChartKind::Line,
            json!({
                "labels": labels,
                "datasets": [{ "label": "Sales (¥)", "data": sales }]
            }),
            None,
        );

        let labels: Vec<&str> = trends.online_rate.iter().map(|p| p.date.as_str()).collect();
        let rates: Vec<f64> = trends.online_rate.iter().map(|p| p.value).collect();
        let online_chart = create_chart(
            dom,
            &library,
            ONLINE_RATE_CHART_ID,
            ChartKind::Bar,
            json!({
                "labels": labels,
                "datasets": [{ "label": "Online rate (%)", "data": rates }]
            }),
            Some(&json!({ "scales": { "y": { "min": 0, "max": 100 } } })),
        );

        sales_chart.into_iter().chain(online_chart).collect()
    }

    /// Fetch one page of orders and render it into the orders table.
    pub async fn load_orders(&self, query: &OrderQuery) -> Result<OrderList, CoreError> {
        let query = OrderQuery {
            page_size: query.page_size.or(Some(self.inner.config.default_page_size)),
            ..query.clone()
        };

        let list = self.inner.api.list_orders(&query).await?;
        let rendered = create_data_table(
            self.inner.dom.as_ref(),
            ORDERS_TABLE_ID,
            &list.orders,
            &orders_columns(),
            &TableOptions {
                empty_text: "No orders".into(),
            },
        );
        debug!(
            count = list.orders.len(),
            rendered = rendered.is_some(),
            "orders loaded"
        );
        Ok(list)
    }

    /// Fetch the material dictionary, ordered by code, and render it.
    pub async fn load_materials(&self) -> Result<Vec<Material>, CoreError> {
        let materials: Vec<Material> = self
            .inner
            .api
            .list_materials()
            .await?
            .into_iter()
            .map(|(code, mut material)| {
                if material.code.is_empty() {
                    material.code = code;
                }
                material
            })
            .collect();
        create_data_table(
            self.inner.dom.as_ref(),
            MATERIALS_TABLE_ID,
            &materials,
            &materials_columns(),
            &TableOptions {
                empty_text: "No materials".into(),
            },
        );
        Ok(materials)
    }

    /// Fetch the material bins of one device and render them.
    pub async fn load_device_bins(&self, device_id: &str) -> Result<Vec<DeviceBin>, CoreError> {
        let bins = self.inner.api.device_bins(device_id).await?;
        create_data_table(
            self.inner.dom.as_ref(),
            BINS_TABLE_ID,
            &bins,
            &bins_columns(),
            &TableOptions {
                empty_text: "No bins configured".into(),
            },
        );
        Ok(bins)
    }

    // ── Auto-refresh ─────────────────────────────────────────────────

    /// Make `callback` the page's refresh routine and start the timer.
    ///
    /// `interval` defaults to the configured refresh interval.
    pub fn start_auto_refresh(&self, callback: RefreshCallback, interval: Option<Duration>) {
        self.inner
            .visibility
            .register_page_refresh(Arc::clone(&callback));
        self.inner.refresh.start(callback, interval);
    }

    pub fn stop_auto_refresh(&self) -> bool {
        self.inner.visibility.clear_page_refresh();
        self.inner.refresh.stop()
    }
}

/// Columns of the device list table.
pub fn devices_columns() -> Vec<Column<Device>> {
    vec![
        Column::new("device_id", "Device ID").width("140px"),
        Column::new("alias", "Alias"),
        Column::new("model", "Model"),
        Column::new("status", "Status")
            .width("100px")
            .render(|_, d: &Device| get_status_badge(&d.status)),
        Column::new("last_seen_ts", "Last Seen").render(|_, d: &Device| {
            d.last_seen_ts
                .map_or_else(|| "-".into(), get_last_seen_text)
        }),
        Column::new("today_orders", "Orders Today").class_name("text-end"),
        Column::new("today_revenue_cents", "Revenue Today")
            .class_name("text-end")
            .render(|_, d: &Device| format_currency(d.today_revenue_cents.unwrap_or(0))),
        Column::new("low_materials_count", "Low Materials").class_name("text-end"),
    ]
}

/// Columns of the order list table.
pub fn orders_columns() -> Vec<Column<Order>> {
    vec![
        Column::new("order_id", "Order ID").width("160px"),
        Column::new("device_id", "Device"),
        Column::new("total_amount_cents", "Amount")
            .class_name("text-end")
            .render(|_, o: &Order| format_currency(o.total_amount_cents)),
        Column::new("payment_method", "Payment"),
        Column::new("payment_status", "Payment Status")
            .render(|_, o: &Order| order_badge(&o.payment_status)),
        Column::new("order_status", "Order Status")
            .render(|_, o: &Order| order_badge(&o.order_status)),
        Column::new("created_ts", "Created").render(|_, o: &Order| {
            o.created_ts
                .map_or_else(|| "-".into(), |ts| format_timestamp(ts, true))
        }),
    ]
}

fn order_badge(status: &str) -> String {
    let kind = match status {
        "paid" | "completed" => "success",
        "refunded" | "cancelled" => "secondary",
        "failed" => "danger",
        _ => "warning",
    };
    format!(
        r#"<span class="badge bg-{kind}">{}</span>"#,
        escape_html(status)
    )
}

/// Columns of the material dictionary table.
pub fn materials_columns() -> Vec<Column<Material>> {
    vec![
        Column::new("code", "Code").width("120px"),
        Column::new("name", "Name"),
        Column::new("type", "Type"),
        Column::new("unit", "Unit"),
        Column::new("enabled", "Enabled").render(|v: &Value, _| {
            if v.as_bool() == Some(true) {
                r#"<span class="badge bg-success">Yes</span>"#.into()
            } else {
                r#"<span class="badge bg-secondary">No</span>"#.into()
            }
        }),
    ]
}

/// Columns of the per-device bin table.
pub fn bins_columns() -> Vec<Column<DeviceBin>> {
    vec![
        Column::new("bin_index", "Bin").width("60px"),
        Column::new("material_code", "Material")
            .render(|_, b: &DeviceBin| {
                let name = if b.material_name.is_empty() {
                    &b.material_code
                } else {
                    &b.material_name
                };
                escape_html(name)
            }),
        Column::new("remaining", "Remaining")
            .class_name("text-end")
            .render(|_, b: &DeviceBin| format!("{} / {} {}", b.remaining, b.capacity, b.unit)),
        Column::new("fill_percentage", "Fill")
            .class_name("text-end")
            .render(|_, b: &DeviceBin| {
                let class = if b.is_low { "text-danger" } else { "text-success" };
                format!(
                    r#"<span class="{class}">{}</span>"#,
                    format_percentage(b.fill_percentage)
                )
            }),
    ]
}
