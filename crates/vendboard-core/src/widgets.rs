//! Modal and tooltip helpers.
//!
//! The widget toolkit sits behind [`WidgetLibrary`]. [`BootstrapWidgets`]
//! reproduces the class and attribute changes Bootstrap's own scripts make,
//! which is enough for server-rendered pages and for tests.

use tracing::debug;

use crate::dom::{Dom, NodeId};

pub const TOOLTIP_TOGGLE_ATTR: &str = "data-bs-toggle";

pub trait WidgetLibrary {
    fn show_modal(&self, dom: &dyn Dom, modal: NodeId);
    fn hide_modal(&self, dom: &dyn Dom, modal: NodeId);
    fn attach_tooltip(&self, dom: &dyn Dom, element: NodeId);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapWidgets;

impl WidgetLibrary for BootstrapWidgets {
    fn show_modal(&self, dom: &dyn Dom, modal: NodeId) {
        dom.add_class(modal, "show");
        dom.set_attribute(modal, "style", "display: block");
        dom.set_attribute(modal, "aria-modal", "true");
        dom.remove_attribute(modal, "aria-hidden");
    }

    fn hide_modal(&self, dom: &dyn Dom, modal: NodeId) {
        dom.remove_class(modal, "show");
        dom.set_attribute(modal, "style", "display: none");
        dom.set_attribute(modal, "aria-hidden", "true");
        dom.remove_attribute(modal, "aria-modal");
    }

    fn attach_tooltip(&self, dom: &dyn Dom, element: NodeId) {
        if let Some(title) = dom.attribute(element, "title") {
            dom.set_attribute(element, "data-bs-original-title", &title);
        }
    }
}

/// Show the modal with id `modal_id`. Returns `false` if it does not exist.
pub fn show_modal(dom: &dyn Dom, library: &impl WidgetLibrary, modal_id: &str) -> bool {
    let Some(modal) = dom.element_by_id(modal_id) else {
        debug!(modal_id, "modal not found");
        return false;
    };
    library.show_modal(dom, modal);
    true
}

/// Hide the modal with id `modal_id`. Returns `false` if it does not exist.
pub fn hide_modal(dom: &dyn Dom, library: &impl WidgetLibrary, modal_id: &str) -> bool {
    let Some(modal) = dom.element_by_id(modal_id) else {
        debug!(modal_id, "modal not found");
        return false;
    };
    library.hide_modal(dom, modal);
    true
}

/// Attach a tooltip to every `[data-bs-toggle="tooltip"]` element.
pub fn init_tooltips(dom: &dyn Dom, library: &impl WidgetLibrary) -> usize {
    let targets: Vec<NodeId> = dom
        .descendants(dom.body())
        .into_iter()
        .filter(|&n| dom.attribute(n, TOOLTIP_TOGGLE_ATTR).as_deref() == Some("tooltip"))
        .collect();
    for &node in &targets {
        library.attach_tooltip(dom, node);
    }
    targets.len()
}
