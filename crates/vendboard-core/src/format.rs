//! Human-readable formatting for timestamps, money, sizes, durations and
//! device status. All functions are pure; the markup-producing ones return
//! `<span>` fragments for table cells.

use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone, Utc};
use strum::{Display, EnumString};

use crate::dom::escape_html;

pub const CURRENCY_SYMBOL: &str = "¥";

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

// ── Timestamps ───────────────────────────────────────────────────────

/// Format unix seconds as a local date, optionally with `HH:MM`.
pub fn format_timestamp(ts: i64, include_time: bool) -> String {
    format_timestamp_in(ts, include_time, &Local)
}

/// [`format_timestamp`] in an explicit timezone. Out-of-range input yields `-`.
pub fn format_timestamp_in<Tz: TimeZone>(ts: i64, include_time: bool, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(utc) = DateTime::<Utc>::from_timestamp(ts, 0) else {
        return "-".into();
    };
    let local = utc.with_timezone(tz);
    if include_time {
        local.format("%Y-%m-%d %H:%M").to_string()
    } else {
        local.format("%Y-%m-%d").to_string()
    }
}

// ── Money / sizes / durations ────────────────────────────────────────

/// Format integer cents as `¥12.34`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{CURRENCY_SYMBOL}{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Format a byte count with one decimal place: `1.5 KB`, `1.0 MB`.
///
/// The unit is `floor(log1024(bytes))`, capped at GB. Zero is special-cased
/// before any logarithm is taken.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".into();
    }
    let exp = bytes.ilog(1024).min(3);
    let value = bytes as f64 / 1024_f64.powi(exp.try_into().unwrap_or(3));
    let unit = BYTE_UNITS.get(exp as usize).copied().unwrap_or("GB");
    format!("{value:.1} {unit}")
}

/// Format seconds in a single unit, floored: `59seconds`, `1minutes`, `2hours`.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}seconds")
    } else if secs < 3600 {
        format!("{}minutes", secs / 60)
    } else {
        format!("{}hours", secs / 3600)
    }
}

/// Format a percentage with one decimal: `87.5%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

// ── Device status ────────────────────────────────────────────────────

/// Known device status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Maintenance,
    Error,
}

impl DeviceStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Online => "status-online",
            Self::Offline => "status-offline",
            Self::Maintenance => "status-maintenance",
            Self::Error => "status-error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Maintenance => "Maintenance",
            Self::Error => "Error",
        }
    }
}

/// Badge markup for a device status code.
///
/// Unrecognized codes get the offline style with the raw code as label.
pub fn get_status_badge(status: &str) -> String {
    let (class, label) = match DeviceStatus::from_str(status) {
        Ok(known) => (known.css_class(), known.label().to_owned()),
        Err(_) => (DeviceStatus::Offline.css_class(), escape_html(status)),
    };
    format!(r#"<span class="status-badge {class}">{label}</span>"#)
}

// ── Last seen ────────────────────────────────────────────────────────

/// Relative "last seen" markup measured against the current time.
pub fn get_last_seen_text(last_seen_ts: i64) -> String {
    last_seen_text_at(last_seen_ts, Utc::now().timestamp())
}

/// Relative "last seen" markup measured against `now` (unix seconds).
///
/// Buckets are strict `<` comparisons at 300, 3600 and 86400 seconds;
/// anything under an hour is styled `recent`, the rest `old`.
pub fn last_seen_text_at(last_seen_ts: i64, now: i64) -> String {
    let diff = now.saturating_sub(last_seen_ts);
    let (text, class) = if diff < 300 {
        ("just now".to_owned(), "recent")
    } else if diff < 3600 {
        (format!("{} minutes ago", diff / 60), "recent")
    } else if diff < 86400 {
        (format!("{} hours ago", diff / 3600), "old")
    } else {
        (format!("{} days ago", diff / 86400), "old")
    };
    format!(r#"<span class="last-seen {class}">{text}</span>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_currency(0), "¥0.00");
        assert_eq!(format_currency(5), "¥0.05");
        assert_eq!(format_currency(1250), "¥12.50");
        assert_eq!(format_currency(123_456_789), "¥1234567.89");
        assert_eq!(format_currency(-150), "¥-1.50");
    }

    #[test]
    fn bytes_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1.0 B");
        assert_eq!(format_bytes(1023), "1023.0 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_048_576), "1.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_bytes(2 * 1024_u64.pow(4)), "2048.0 GB");
    }

    #[test]
    fn duration_floors_into_one_unit() {
        assert_eq!(format_duration(0), "0seconds");
        assert_eq!(format_duration(59), "59seconds");
        assert_eq!(format_duration(60), "1minutes");
        assert_eq!(format_duration(90), "1minutes");
        assert_eq!(format_duration(3599), "59minutes");
        assert_eq!(format_duration(3700), "1hours");
        assert_eq!(format_duration(90_000), "25hours");
    }

    #[test]
    fn timestamp_in_utc() {
        assert_eq!(format_timestamp_in(1_700_000_000, false, &Utc), "2023-11-14");
        assert_eq!(
            format_timestamp_in(1_700_000_000, true, &Utc),
            "2023-11-14 22:13"
        );
        assert_eq!(format_timestamp_in(i64::MAX, true, &Utc), "-");
    }

    #[test]
    fn status_badges() {
        assert_eq!(
            get_status_badge("online"),
            r#"<span class="status-badge status-online">Online</span>"#
        );
        assert_eq!(
            get_status_badge("maintenance"),
            r#"<span class="status-badge status-maintenance">Maintenance</span>"#
        );
        assert_eq!(
            get_status_badge("error"),
            r#"<span class="status-badge status-error">Error</span>"#
        );
    }

    #[test]
    fn unknown_status_uses_offline_style_and_raw_code() {
        assert_eq!(
            get_status_badge("rebooting"),
            r#"<span class="status-badge status-offline">rebooting</span>"#
        );
        assert_eq!(
            get_status_badge("<b>"),
            r#"<span class="status-badge status-offline">&lt;b&gt;</span>"#
        );
    }

    #[test]
    fn last_seen_buckets() {
        let now = 1_000_000;
        let at = |diff: i64| last_seen_text_at(now - diff, now);

        assert_eq!(at(100), r#"<span class="last-seen recent">just now</span>"#);
        assert_eq!(at(1000), r#"<span class="last-seen recent">16 minutes ago</span>"#);
        assert_eq!(at(5000), r#"<span class="last-seen old">1 hours ago</span>"#);
        assert_eq!(at(100_000), r#"<span class="last-seen old">1 days ago</span>"#);
    }

    #[test]
    fn last_seen_boundaries_go_to_next_bucket() {
        let now = 1_000_000;
        let at = |diff: i64| last_seen_text_at(now - diff, now);

        assert_eq!(at(299), r#"<span class="last-seen recent">just now</span>"#);
        assert_eq!(at(300), r#"<span class="last-seen recent">5 minutes ago</span>"#);
        assert_eq!(at(3600), r#"<span class="last-seen old">1 hours ago</span>"#);
        assert_eq!(at(86400), r#"<span class="last-seen old">1 days ago</span>"#);
    }

    #[test]
    fn percentage_one_decimal() {
        assert_eq!(format_percentage(87.46), "87.5%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }
}
