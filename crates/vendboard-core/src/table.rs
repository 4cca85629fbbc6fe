// ── Data tables ──
//
// Declarative rebuild of a `<table>` from column definitions and a row slice.
// Every call clears the table and renders from scratch; nothing is kept
// between calls.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::dom::{Dom, NodeId};

pub const TABLE_CLASS: &str = "table table-hover";
pub const DEFAULT_EMPTY_TEXT: &str = "No data";

/// Custom cell renderer: `(raw field value, whole row) -> markup`.
pub type CellRenderer<T> = Box<dyn Fn(&Value, &T) -> String + Send + Sync>;

/// One column of a data table.
pub struct Column<T> {
    /// Key looked up in the row's JSON form.
    pub field: String,
    pub title: String,
    /// CSS width for the header cell (e.g. `"120px"`).
    pub width: Option<String>,
    pub render: Option<CellRenderer<T>>,
    /// Class applied to every body cell of this column.
    pub class_name: Option<String>,
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .field("class_name", &self.class_name)
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            width: None,
            render: None,
            class_name: None,
        }
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn render(mut self, f: impl Fn(&Value, &T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Message shown in the single full-width row when there is no data.
    pub empty_text: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            empty_text: DEFAULT_EMPTY_TEXT.into(),
        }
    }
}

/// Rebuild the table with id `table_id`.
///
/// Returns the table node, or `None` (doing nothing) if no such element
/// exists.
pub fn create_data_table<T: Serialize>(
    dom: &dyn Dom,
    table_id: &str,
    data: &[T],
    columns: &[Column<T>],
    options: &TableOptions,
) -> Option<NodeId> {
    let Some(table) = dom.element_by_id(table_id) else {
        debug!(table_id, "table not found; skipping render");
        return None;
    };
    dom.clear(table);

    let thead = dom.create_element("thead");
    let header_row = dom.create_element("tr");
    for col in columns {
        let th = dom.create_element("th");
        if let Some(ref width) = col.width {
            dom.set_attribute(th, "style", &format!("width: {width}"));
        }
        dom.set_text(th, &col.title);
        dom.append_child(header_row, th);
    }
    dom.append_child(thead, header_row);
    dom.append_child(table, thead);

    let tbody = dom.create_element("tbody");
    if data.is_empty() {
        let tr = dom.create_element("tr");
        let td = dom.create_element("td");
        dom.set_attribute(td, "colspan", &columns.len().to_string());
        dom.set_attribute(td, "class", "text-center text-muted");
        dom.set_text(td, &options.empty_text);
        dom.append_child(tr, td);
        dom.append_child(tbody, tr);
    } else {
        for item in data {
            let row = row_value(item);
            let tr = dom.create_element("tr");
            for col in columns {
                let td = dom.create_element("td");
                if let Some(ref class) = col.class_name {
                    dom.set_attribute(td, "class", class);
                }
                let raw = row.get(&col.field).unwrap_or(&Value::Null);
                match col.render {
                    Some(ref render) => dom.set_inner_html(td, &render(raw, item)),
                    None => dom.set_text(td, &cell_text(raw)),
                }
                dom.append_child(tr, td);
            }
            dom.append_child(tbody, tr);
        }
    }
    dom.append_child(table, tbody);

    dom.set_attribute(table, "class", TABLE_CLASS);
    Some(table)
}

fn row_value<T: Serialize>(item: &T) -> Value {
    serde_json::to_value(item).unwrap_or_else(|e| {
        warn!(error = %e, "row is not serializable; rendering empty cells");
        Value::Null
    })
}

/// Text for a raw cell value; missing and falsy values render as `-`.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => "-".into(),
        Value::String(s) if s.is_empty() => "-".into(),
        Value::Number(n) if n.as_f64() == Some(0.0) => "-".into(),
        other => display_text(other),
    }
}

/// Browser-style string coercion: arrays join their items with `,`, null
/// items become empty, and objects collapse to a fixed placeholder.
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".into(),
    }
}
