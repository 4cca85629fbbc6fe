#![allow(clippy::unwrap_used)]
// Rendering tests for tables, forms, widgets and charts against `MemoryDom`.

use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

use vendboard_core::chart::CHART_CONFIG_ATTR;
use vendboard_core::{
    BootstrapWidgets, ChartKind, Column, Dom, EmbeddedChartLibrary, MemoryDom, NodeId,
    TableOptions, clear_field_error, create_chart, create_data_table, hide_modal, init_tooltips,
    reset_form, serialize_form, show_field_error, show_modal,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Row {
    id: String,
    qty: u32,
    note: String,
}

fn row(id: &str, qty: u32, note: &str) -> Row {
    Row {
        id: id.into(),
        qty,
        note: note.into(),
    }
}

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID").width("80px"),
        Column::new("qty", "Qty").class_name("text-end"),
        Column::new("note", "Note"),
    ]
}

fn body_rows(dom: &MemoryDom, table: NodeId) -> Vec<NodeId> {
    let tbody = dom
        .children(table)
        .into_iter()
        .find(|&n| dom.tag_name(n).as_deref() == Some("tbody"))
        .unwrap();
    dom.children(tbody)
}

// ── Tables ──────────────────────────────────────────────────────────

#[test]
fn table_renders_one_row_per_item_and_one_cell_per_column() {
    let dom = MemoryDom::new();
    dom.append_element(dom.body(), "table", &[("id", "t")]);
    let data = vec![row("A1", 3, "ok"), row("A2", 0, "")];

    let table = create_data_table(&dom, "t", &data, &columns(), &TableOptions::default()).unwrap();

    let rows = body_rows(&dom, table);
    assert_eq!(rows.len(), 2);
    for tr in &rows {
        assert_eq!(dom.children(*tr).len(), 3);
    }
    assert_eq!(
        dom.outer_html(rows[0]),
        r#"<tr><td>A1</td><td class="text-end">3</td><td>ok</td></tr>"#
    );
    assert_eq!(
        dom.outer_html(rows[1]),
        r#"<tr><td>A2</td><td class="text-end">-</td><td>-</td></tr>"#
    );
    assert_eq!(dom.attribute(table, "class").as_deref(), Some("table table-hover"));
}

#[test]
fn table_header_carries_titles_and_widths() {
    let dom = MemoryDom::new();
    dom.append_element(dom.body(), "table", &[("id", "t")]);

    let table = create_data_table::<Row>(&dom, "t", &[], &columns(), &TableOptions::default())
        .unwrap();

    let thead = dom.children(table)[0];
    assert_eq!(
        dom.inner_html(thead),
        r#"<tr><th style="width: 80px">ID</th><th>Qty</th><th>Note</th></tr>"#
    );
}

#[test]
fn empty_table_shows_single_spanning_row() {
    let dom = MemoryDom::new();
    dom.append_element(dom.body(), "table", &[("id", "t")]);
    let cols: Vec<Column<Row>> = vec![
        Column::new("id", "A"),
        Column::new("qty", "B"),
        Column::new("note", "C"),
    ];

    let table = create_data_table(&dom, "t", &[], &cols, &TableOptions::default()).unwrap();

    assert_eq!(
        dom.inner_html(table),
        concat!(
            "<thead><tr><th>A</th><th>B</th><th>C</th></tr></thead>",
            r#"<tbody><tr><td colspan="3" class="text-center text-muted">No data</td></tr></tbody>"#,
        )
    );
}

#[test]
fn empty_table_uses_custom_text() {
    let dom = MemoryDom::new();
    dom.append_element(dom.body(), "table", &[("id", "t")]);
    let options = TableOptions {
        empty_text: "No devices".into(),
    };

    let table = create_data_table::<Row>(&dom, "t", &[], &columns(), &options).unwrap();

    let rows = body_rows(&dom, table);
    assert_eq!(rows.len(), 1);
    assert_eq!(dom.text_content(rows[0]), "No devices");
}

#[test]
fn render_function_output_is_inserted_as_markup() {
    let dom = MemoryDom::new();
    dom.append_element(dom.body(), "table", &[("id", "t")]);
    let cols = vec![
        Column::new("id", "ID").render(|v, r: &Row| format!("<b>{}</b>:{}", v.as_str().unwrap(), r.qty)),
        Column::new("note", "Note"),
    ];

    let table = create_data_table(&dom, "t", &[row("X", 7, "<i>")], &cols, &TableOptions::default())
        .unwrap();

    assert_eq!(
        dom.outer_html(body_rows(&dom, table)[0]),
        "<tr><td><b>X</b>:7</td><td>&lt;i&gt;</td></tr>"
    );
}

#[test]
fn rerender_replaces_previous_content() {
    let dom = MemoryDom::new();
    dom.append_element(dom.body(), "table", &[("id", "t")]);
    let options = TableOptions::default();

    create_data_table(&dom, "t", &[row("A", 1, "x"), row("B", 2, "y")], &columns(), &options);
    let table = create_data_table(&dom, "t", &[row("C", 3, "z")], &columns(), &options).unwrap();

    assert_eq!(dom.children(table).len(), 2);
    assert_eq!(body_rows(&dom, table).len(), 1);
}

#[test]
fn repeated_rerenders_reuse_node_slots() {
    let dom = MemoryDom::new();
    dom.append_element(dom.body(), "table", &[("id", "t")]);
    let options = TableOptions::default();
    let data: Vec<Row> = (0..20).map(|i| row(&format!("R{i}"), i, "note")).collect();

    create_data_table(&dom, "t", &data, &columns(), &options);
    let slots = dom.slot_count();
    let live = dom.live_nodes();

    for _ in 0..1000 {
        create_data_table(&dom, "t", &data, &columns(), &options);
    }

    assert_eq!(dom.slot_count(), slots);
    assert_eq!(dom.live_nodes(), live);
    let table = dom.element_by_id("t").unwrap();
    assert_eq!(body_rows(&dom, table).len(), 20);
}

#[test]
fn missing_table_is_a_no_op() {
    let dom = MemoryDom::new();
    let result = create_data_table(&dom, "nope", &[row("A", 1, "x")], &columns(), &TableOptions::default());
    assert!(result.is_none());
    assert!(dom.children(dom.body()).is_empty());
}

// ── Forms ───────────────────────────────────────────────────────────

fn device_form(dom: &MemoryDom) -> NodeId {
    let form = dom.append_element(dom.body(), "form", &[("id", "f")]);
    dom.append_element(form, "input", &[("name", "merchant"), ("value", "M1")]);
    dom.append_element(form, "input", &[("type", "checkbox"), ("name", "active"), ("checked", "")]);
    dom.append_element(form, "input", &[("type", "checkbox"), ("name", "archived")]);
    dom.append_element(form, "input", &[("type", "radio"), ("name", "status"), ("value", "online")]);
    dom.append_element(
        form,
        "input",
        &[("type", "radio"), ("name", "status"), ("value", "offline"), ("checked", "")],
    );
    let select = dom.append_element(form, "select", &[("name", "model")]);
    dom.append_element(select, "option", &[("value", "A")]);
    dom.append_element(select, "option", &[("value", "B"), ("selected", "")]);
    let note = dom.append_element(form, "textarea", &[("name", "note")]);
    dom.append_text(note, "hello");
    dom.append_element(form, "input", &[("name", "locked"), ("value", "x"), ("disabled", "")]);
    dom.append_element(form, "input", &[("type", "submit"), ("name", "go"), ("value", "Go")]);
    dom.append_element(form, "input", &[("value", "anonymous")]);
    form
}

#[test]
fn serialize_form_collects_named_enabled_controls() {
    let dom = MemoryDom::new();
    let form = device_form(&dom);

    let data = serialize_form(&dom, form);

    let pairs: Vec<(&str, &str)> = data.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            ("merchant", "M1"),
            ("active", "on"),
            ("status", "offline"),
            ("model", "B"),
            ("note", "hello"),
        ]
    );
}

#[test]
fn serialize_form_sees_user_edits() {
    let dom = MemoryDom::new();
    let form = device_form(&dom);
    let merchant = dom.descendants(form)[0];

    dom.set_value(merchant, Some("M2"));
    let active = dom.descendants(form)[1];
    dom.set_checked(active, Some(false));

    let data = serialize_form(&dom, form);
    assert_eq!(data.get("merchant").map(String::as_str), Some("M2"));
    assert!(!data.contains_key("active"));
}

#[test]
fn reset_form_restores_defaults_and_strips_validation() {
    let dom = MemoryDom::new();
    let form = device_form(&dom);
    let merchant = dom.descendants(form)[0];
    dom.add_class(form, "was-validated");
    dom.set_value(merchant, Some("changed"));
    show_field_error(&dom, merchant, "required");

    reset_form(&dom, form);

    assert_eq!(dom.value(merchant), "M1");
    assert!(!dom.has_class(merchant, "is-invalid"));
    assert!(!dom.has_class(form, "was-validated"));
    assert!(dom.elements_by_class(form, "invalid-feedback").is_empty());
}

#[test]
fn show_field_error_twice_keeps_one_message() {
    let dom = MemoryDom::new();
    let form = dom.append_element(dom.body(), "form", &[]);
    let field = dom.append_element(form, "input", &[("name", "alias"), ("class", "form-control is-valid")]);
    dom.append_element(form, "input", &[("name", "model")]);

    show_field_error(&dom, field, "first");
    show_field_error(&dom, field, "second");

    let feedback = dom.elements_by_class(form, "invalid-feedback");
    assert_eq!(feedback.len(), 1);
    assert_eq!(dom.text_content(feedback[0]), "second");
    assert_eq!(dom.next_sibling(field), Some(feedback[0]));
    assert_eq!(dom.attribute(field, "class").as_deref(), Some("form-control is-invalid"));
}

#[test]
fn show_field_error_reuses_feedback_after_whitespace() {
    let dom = MemoryDom::new();
    let form = dom.append_element(dom.body(), "form", &[]);
    let field = dom.append_element(form, "input", &[("name", "alias")]);
    dom.append_text(form, "\n  ");
    let server_feedback = dom.append_element(form, "div", &[("class", "invalid-feedback")]);
    dom.set_text(server_feedback, "taken");

    show_field_error(&dom, field, "too short");

    let feedback = dom.elements_by_class(form, "invalid-feedback");
    assert_eq!(feedback, vec![server_feedback]);
    assert_eq!(dom.text_content(server_feedback), "too short");

    clear_field_error(&dom, field);
    assert!(dom.elements_by_class(form, "invalid-feedback").is_empty());
}

#[test]
fn serialize_form_skips_controls_in_disabled_fieldset() {
    let dom = MemoryDom::new();
    let form = dom.append_element(dom.body(), "form", &[]);
    let locked = dom.append_element(form, "fieldset", &[("disabled", "")]);
    let legend = dom.append_element(locked, "legend", &[]);
    dom.append_element(legend, "input", &[("name", "in_legend"), ("value", "1")]);
    dom.append_element(locked, "input", &[("name", "locked"), ("value", "2")]);
    let nested = dom.append_element(locked, "div", &[]);
    dom.append_element(nested, "input", &[("name", "nested"), ("value", "3")]);
    let open = dom.append_element(form, "fieldset", &[]);
    dom.append_element(open, "input", &[("name", "open"), ("value", "4")]);

    let data = serialize_form(&dom, form);

    let keys: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["in_legend", "open"]);
}

#[test]
fn clear_field_error_removes_decoration() {
    let dom = MemoryDom::new();
    let form = dom.append_element(dom.body(), "form", &[]);
    let field = dom.append_element(form, "input", &[("name", "alias")]);

    show_field_error(&dom, field, "bad");
    clear_field_error(&dom, field);

    assert!(!dom.has_class(field, "is-invalid"));
    assert!(dom.elements_by_class(form, "invalid-feedback").is_empty());
}

// ── Widgets ─────────────────────────────────────────────────────────

#[test]
fn modals_toggle_and_missing_ids_report_false() {
    let dom = MemoryDom::new();
    let modal = dom.append_element(dom.body(), "div", &[("id", "edit"), ("class", "modal")]);

    assert!(show_modal(&dom, &BootstrapWidgets, "edit"));
    assert!(dom.has_class(modal, "show"));
    assert_eq!(dom.attribute(modal, "aria-modal").as_deref(), Some("true"));

    assert!(hide_modal(&dom, &BootstrapWidgets, "edit"));
    assert!(!dom.has_class(modal, "show"));
    assert_eq!(dom.attribute(modal, "aria-hidden").as_deref(), Some("true"));

    assert!(!show_modal(&dom, &BootstrapWidgets, "missing"));
    assert!(!hide_modal(&dom, &BootstrapWidgets, "missing"));
}

#[test]
fn tooltips_attach_to_marked_elements_only() {
    let dom = MemoryDom::new();
    let nav = dom.append_element(dom.body(), "nav", &[]);
    let a = dom.append_element(nav, "a", &[("data-bs-toggle", "tooltip"), ("title", "Home")]);
    dom.append_element(nav, "a", &[("data-bs-toggle", "dropdown")]);
    dom.append_element(dom.body(), "span", &[("data-bs-toggle", "tooltip")]);

    assert_eq!(init_tooltips(&dom, &BootstrapWidgets), 2);
    assert_eq!(dom.attribute(a, "data-bs-original-title").as_deref(), Some("Home"));
}

// ── Charts ──────────────────────────────────────────────────────────

#[test]
fn chart_on_missing_canvas_is_none() {
    let dom = MemoryDom::new();
    let chart = create_chart(&dom, &EmbeddedChartLibrary, "sales", ChartKind::Line, json!({}), None);
    assert!(chart.is_none());
}

#[test]
fn chart_config_is_written_to_canvas() {
    let dom = MemoryDom::new();
    let canvas = dom.append_element(dom.body(), "canvas", &[("id", "sales")]);
    let data = json!({ "labels": ["Mon", "Tue"], "datasets": [{ "data": [1, 2] }] });

    let chart = create_chart(
        &dom,
        &EmbeddedChartLibrary,
        "sales",
        ChartKind::Bar,
        data.clone(),
        Some(&json!({ "maintainAspectRatio": true })),
    )
    .unwrap();

    assert_eq!(chart.canvas, canvas);
    assert_eq!(chart.config.options["maintainAspectRatio"], json!(true));
    assert_eq!(chart.config.options["responsive"], json!(true));
    assert_eq!(chart.config.options["plugins"]["legend"]["position"], json!("top"));

    let stored: serde_json::Value =
        serde_json::from_str(&dom.attribute(canvas, CHART_CONFIG_ATTR).unwrap()).unwrap();
    assert_eq!(stored["type"], json!("bar"));
    assert_eq!(stored["data"], data);
}
