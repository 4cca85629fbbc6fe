//! Terminal rendering for command results.
//!
//! Data goes to stdout. Toasts raised while a command ran are printed to
//! stderr and removed from the page, one line each.

use std::io::{self, Write};

use serde::Serialize;

use vendboard_api::{
    DashboardSummary, DeviceBin, DeviceList, Health, Material, Message, Order, OrderList,
    Pagination,
};
use vendboard_core::chart::CHART_CONFIG_ATTR;
use vendboard_core::{
    BINS_TABLE_ID, ChartConfig, DEVICES_TABLE_ID, Dashboard, Dom, MATERIALS_TABLE_ID, MemoryDom,
    ONLINE_RATE_CHART_ID, ORDERS_TABLE_ID, SALES_CHART_ID, format_currency, format_percentage,
    format_timestamp,
};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn print_json<T: Serialize>(data: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(data)?;
    writeln!(io::stdout(), "{text}")?;
    Ok(())
}

fn print_text(text: &str) -> Result<(), CliError> {
    writeln!(io::stdout(), "{text}")?;
    Ok(())
}

fn table_markup(dom: &MemoryDom, table_id: &str) -> String {
    dom.element_by_id(table_id)
        .map(|t| dom.outer_html(t))
        .unwrap_or_default()
}

fn pagination_line(p: &Pagination, noun: &str) -> String {
    format!(
        "page {} | page size {} | {} {noun} total{}",
        p.page,
        p.page_size,
        p.total,
        if p.has_more { " | more available" } else { "" }
    )
}

/// The devices table markup followed by a pagination line.
pub fn render_devices(dom: &MemoryDom, list: &DeviceList) -> String {
    format!(
        "{}\n{}",
        table_markup(dom, DEVICES_TABLE_ID),
        pagination_line(&list.pagination, "devices")
    )
}

pub fn print_devices(
    format: OutputFormat,
    dom: &MemoryDom,
    list: &DeviceList,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(list),
        OutputFormat::Text => {
            writeln!(io::stdout(), "{}", render_devices(dom, list))?;
            Ok(())
        }
    }
}

pub fn render_summary(s: &DashboardSummary) -> String {
    [
        format!("Devices:         {}", s.device_total),
        format!("Online rate:     {}", format_percentage(s.online_rate)),
        format!("Sales today:     {}", format_currency(s.sales_today)),
        format!("Sales this week: {}", format_currency(s.sales_week)),
        format!("Open alarms:     {}", s.alarms_open),
        format!("Low materials:   {}", s.materials_low),
    ]
    .join("\n")
}

/// One line per trend chart drawn on the page: dataset label, chart type
/// and `date=value` pairs.
pub fn render_trends(dom: &MemoryDom) -> Vec<String> {
    [SALES_CHART_ID, ONLINE_RATE_CHART_ID]
        .into_iter()
        .filter_map(|id| dom.element_by_id(id))
        .filter_map(|canvas| dom.attribute(canvas, CHART_CONFIG_ATTR))
        .filter_map(|raw| serde_json::from_str::<ChartConfig>(&raw).ok())
        .map(|chart| {
            let dataset = &chart.data["datasets"][0];
            let label = dataset["label"].as_str().unwrap_or("trend");
            let empty = Vec::new();
            let labels = chart.data["labels"].as_array().unwrap_or(&empty);
            let values = dataset["data"].as_array().unwrap_or(&empty);
            let points: Vec<String> = labels
                .iter()
                .zip(values)
                .map(|(day, value)| format!("{}={value}", day.as_str().unwrap_or_default()))
                .collect();
            format!("{label} [{}]: {}", chart.kind, points.join(" "))
        })
        .collect()
}

pub fn print_summary(
    format: OutputFormat,
    dom: &MemoryDom,
    summary: &DashboardSummary,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(summary),
        OutputFormat::Text => {
            let mut lines = vec![render_summary(summary)];
            lines.extend(render_trends(dom));
            print_text(&lines.join("\n"))
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────

/// The orders table, a pagination line and the page statistics.
pub fn render_orders(dom: &MemoryDom, list: &OrderList) -> String {
    let stats = &list.statistics;
    format!(
        "{}\n{}\nrevenue {} | average {} | success rate {}",
        table_markup(dom, ORDERS_TABLE_ID),
        pagination_line(&list.pagination, "orders"),
        format_currency(stats.total_revenue_cents),
        format_currency(stats.avg_order_value_cents),
        format_percentage(stats.success_rate),
    )
}

pub fn print_orders(format: OutputFormat, dom: &MemoryDom, list: &OrderList) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(list),
        OutputFormat::Text => print_text(&render_orders(dom, list)),
    }
}

pub fn render_order(order: &Order) -> String {
    let created = order
        .created_ts
        .map_or_else(|| "-".into(), |ts| format_timestamp(ts, true));
    [
        format!("Order:    {}", order.order_id),
        format!("Device:   {}", order.device_id),
        format!("Amount:   {}", format_currency(order.total_amount_cents)),
        format!("Payment:  {} ({})", order.payment_method, order.payment_status),
        format!("Status:   {}", order.order_status),
        format!("Created:  {created}"),
        format!("Items:    {}", order.items.len()),
    ]
    .join("\n")
}

pub fn print_order(format: OutputFormat, order: &Order) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(order),
        OutputFormat::Text => print_text(&render_order(order)),
    }
}

/// Acknowledgement of a mutating call.
pub fn print_message(format: OutputFormat, message: &Message) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(message),
        OutputFormat::Text => print_text(&message.message),
    }
}

// ── Materials ────────────────────────────────────────────────────────

pub fn print_materials(
    format: OutputFormat,
    dom: &MemoryDom,
    materials: &[Material],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(&materials),
        OutputFormat::Text => print_text(&format!(
            "{}\n{} materials",
            table_markup(dom, MATERIALS_TABLE_ID),
            materials.len()
        )),
    }
}

pub fn print_bins(format: OutputFormat, dom: &MemoryDom, bins: &[DeviceBin]) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(&bins),
        OutputFormat::Text => {
            let low = bins.iter().filter(|b| b.is_low).count();
            print_text(&format!(
                "{}\n{} bins | {low} low",
                table_markup(dom, BINS_TABLE_ID),
                bins.len()
            ))
        }
    }
}

pub fn print_health(format: OutputFormat, health: &Health) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(health),
        OutputFormat::Text => {
            let version = if health.version.is_empty() {
                "unknown"
            } else {
                &health.version
            };
            writeln!(io::stdout(), "status: {}\nversion: {version}", health.status)?;
            Ok(())
        }
    }
}

/// Print and remove every toast currently on the page.
pub fn flush_toasts(dashboard: &Dashboard, dom: &MemoryDom) {
    let mut stderr = io::stderr().lock();
    for toast in dashboard.toaster().active_toasts() {
        let _ = writeln!(stderr, "{}", dom.text_content(toast));
        dom.discard(toast);
    }
}
