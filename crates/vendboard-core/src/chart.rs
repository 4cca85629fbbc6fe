// ── Charts ──
//
// Thin adapter over a charting library. The library itself sits behind
// `ChartLibrary`; this module only locates the canvas, layers options over
// the dashboard defaults and hands the assembled config over.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum::{Display, EnumString};
use tracing::debug;

use crate::dom::{Dom, NodeId};

/// Attribute the embedded library writes its config into.
pub const CHART_CONFIG_ATTR: &str = "data-chart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
    Radar,
}

/// Everything a library needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: Value,
    pub options: Value,
}

/// Charting backend.
pub trait ChartLibrary {
    type Chart;

    fn construct(&self, dom: &dyn Dom, canvas: NodeId, config: ChartConfig) -> Self::Chart;
}

/// Options every dashboard chart starts from.
pub fn default_chart_options() -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": { "position": "top" }
        }
    })
}

/// Overlay `overrides` onto `defaults`, replacing whole top-level keys.
///
/// Nested objects are not merged: an override `plugins` replaces the
/// default `plugins` entirely. A non-object override is ignored.
pub fn merge_chart_options(defaults: Value, overrides: Option<&Value>) -> Value {
    let mut merged = match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(Value::Object(extra)) = overrides {
        for (key, value) in extra {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

/// Build a chart on the canvas with id `canvas_id`.
///
/// Returns `None` without touching the library if the canvas is missing.
pub fn create_chart<L: ChartLibrary>(
    dom: &dyn Dom,
    library: &L,
    canvas_id: &str,
    kind: ChartKind,
    data: Value,
    options: Option<&Value>,
) -> Option<L::Chart> {
    let Some(canvas) = dom.element_by_id(canvas_id) else {
        debug!(canvas_id, "chart canvas not found");
        return None;
    };
    let config = ChartConfig {
        kind,
        data,
        options: merge_chart_options(default_chart_options(), options),
    };
    Some(library.construct(dom, canvas, config))
}

// ── Embedded library ─────────────────────────────────────────────────

/// Chart drawn by the embedded library.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub canvas: NodeId,
    pub config: ChartConfig,
}

/// Library that serializes the config onto the canvas element for a
/// client-side renderer to pick up.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedChartLibrary;

impl ChartLibrary for EmbeddedChartLibrary {
    type Chart = ChartHandle;

    fn construct(&self, dom: &dyn Dom, canvas: NodeId, config: ChartConfig) -> ChartHandle {
        let encoded = serde_json::to_string(&config).unwrap_or_default();
        dom.set_attribute(canvas, CHART_CONFIG_ATTR, &encoded);
        ChartHandle { canvas, config }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_is_shallow() {
        let merged = merge_chart_options(
            default_chart_options(),
            Some(&json!({ "plugins": { "title": { "display": true } }, "animation": false })),
        );
        assert_eq!(merged["responsive"], json!(true));
        assert_eq!(merged["animation"], json!(false));
        assert_eq!(merged["plugins"], json!({ "title": { "display": true } }));
    }

    #[test]
    fn merge_without_overrides_keeps_defaults() {
        assert_eq!(
            merge_chart_options(default_chart_options(), None),
            default_chart_options()
        );
        assert_eq!(
            merge_chart_options(default_chart_options(), Some(&json!([1, 2]))),
            default_chart_options()
        );
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ChartKind::Doughnut).unwrap(), json!("doughnut"));
        assert_eq!(ChartKind::Bar.to_string(), "bar");
    }
}
