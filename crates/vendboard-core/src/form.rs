//! Form serialization and Bootstrap validation decoration.

use indexmap::IndexMap;

use crate::dom::{Dom, NodeId};

const CONTROL_TAGS: &[&str] = &["input", "select", "textarea"];
const SKIPPED_INPUT_TYPES: &[&str] = &["button", "submit", "reset", "image", "file"];
const VALIDATION_CLASSES: &[&str] = &["is-valid", "is-invalid", "was-validated"];
const FEEDBACK_CLASSES: &[&str] = &["invalid-feedback", "valid-feedback"];

fn is_control(dom: &dyn Dom, node: NodeId) -> bool {
    dom.tag_name(node)
        .is_some_and(|tag| CONTROL_TAGS.contains(&tag.as_str()))
}

fn input_type(dom: &dyn Dom, node: NodeId) -> Option<String> {
    (dom.tag_name(node).as_deref() == Some("input"))
        .then(|| dom.attribute(node, "type").unwrap_or_else(|| "text".into()))
        .map(|t| t.to_ascii_lowercase())
}

/// A control is disabled by its own attribute or by a disabled `<fieldset>`
/// around it, unless it sits inside that fieldset's first `<legend>`.
fn is_disabled(dom: &dyn Dom, node: NodeId) -> bool {
    if dom.attribute(node, "disabled").is_some() {
        return true;
    }
    let mut child = node;
    let mut current = dom.parent(node);
    while let Some(ancestor) = current {
        if dom.tag_name(ancestor).as_deref() == Some("fieldset")
            && dom.attribute(ancestor, "disabled").is_some()
        {
            let legend = dom
                .children(ancestor)
                .into_iter()
                .find(|&c| dom.tag_name(c).as_deref() == Some("legend"));
            if legend != Some(child) {
                return true;
            }
        }
        child = ancestor;
        current = dom.parent(ancestor);
    }
    false
}

/// Collect named, enabled form controls into a map.
///
/// Checkboxes and radios contribute only when checked. Keys keep their
/// first-seen position; a repeated name overwrites the earlier value.
pub fn serialize_form(dom: &dyn Dom, form: NodeId) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    for node in dom.descendants(form) {
        if !is_control(dom, node) || is_disabled(dom, node) {
            continue;
        }
        let Some(name) = dom.attribute(node, "name").filter(|n| !n.is_empty()) else {
            continue;
        };
        match input_type(dom, node).as_deref() {
            Some(t) if SKIPPED_INPUT_TYPES.contains(&t) => continue,
            Some("checkbox" | "radio") if !dom.is_checked(node) => continue,
            _ => {}
        }
        out.insert(name, dom.value(node));
    }
    out
}

/// Restore default values and strip all validation decoration.
pub fn reset_form(dom: &dyn Dom, form: NodeId) {
    for class in VALIDATION_CLASSES {
        dom.remove_class(form, class);
    }
    let mut feedback = Vec::new();
    for node in dom.descendants(form) {
        if is_control(dom, node) {
            dom.set_value(node, None);
            dom.set_checked(node, None);
        }
        for class in VALIDATION_CLASSES {
            dom.remove_class(node, class);
        }
        if FEEDBACK_CLASSES.iter().any(|c| dom.has_class(node, c)) {
            feedback.push(node);
        }
    }
    for node in feedback {
        dom.discard(node);
    }
}

/// Mark `field` invalid and show `message` right after it.
///
/// A feedback element already following the field is reused, so repeated
/// calls never stack messages.
pub fn show_field_error(dom: &dyn Dom, field: NodeId, message: &str) {
    dom.remove_class(field, "is-valid");
    dom.add_class(field, "is-invalid");

    if let Some(existing) = feedback_after(dom, field) {
        dom.set_text(existing, message);
        return;
    }
    let feedback = dom.create_element("div");
    dom.set_attribute(feedback, "class", "invalid-feedback");
    dom.set_text(feedback, message);
    dom.insert_after(field, feedback);
}

/// Undo [`show_field_error`] for one field.
pub fn clear_field_error(dom: &dyn Dom, field: NodeId) {
    dom.remove_class(field, "is-invalid");
    if let Some(existing) = feedback_after(dom, field) {
        dom.discard(existing);
    }
}

/// The element right after `field`, skipping text, if it is a feedback
/// message.
fn feedback_after(dom: &dyn Dom, field: NodeId) -> Option<NodeId> {
    let mut next = dom.next_sibling(field);
    while let Some(node) = next {
        if dom.tag_name(node).is_some() {
            return dom.has_class(node, "invalid-feedback").then_some(node);
        }
        next = dom.next_sibling(node);
    }
    None
}
