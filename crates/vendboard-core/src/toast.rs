// ── Toast notifications ──
//
// Transient status messages stacked in a fixed corner container. Each toast
// removes itself after `TOAST_DURATION`; the removal task checks the toast is
// still attached first, so manual dismissal or a cleared container is harmless.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use vendboard_api::{Notifier, Severity};

use crate::dom::{Dom, NodeId};

pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const TOAST_DURATION: Duration = Duration::from_millis(5000);

const CONTAINER_CLASS: &str = "toast-container position-fixed top-0 end-0 p-3";

/// Bootstrap alert variant for a severity.
pub fn alert_kind(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Error => "danger",
        Severity::Success => "success",
        Severity::Warning => "warning",
    }
}

/// Toast surface bound to a document.
#[derive(Clone)]
pub struct Toaster {
    dom: Arc<dyn Dom>,
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster").finish_non_exhaustive()
    }
}

impl Toaster {
    pub fn new(dom: Arc<dyn Dom>) -> Self {
        Self { dom }
    }

    /// Return the toast container, creating it under the body on first use.
    pub fn create_toast_container(&self) -> NodeId {
        if let Some(existing) = self.dom.element_by_id(TOAST_CONTAINER_ID) {
            return existing;
        }
        let container = self.dom.create_element("div");
        self.dom.set_attribute(container, "id", TOAST_CONTAINER_ID);
        self.dom.set_attribute(container, "class", CONTAINER_CLASS);
        self.dom.set_attribute(container, "style", "z-index: 1080");
        self.dom.append_child(self.dom.body(), container);
        container
    }

    /// Append a dismissible toast and schedule its removal.
    ///
    /// Removal runs on the ambient tokio runtime. Outside a runtime the toast
    /// is still shown but stays until dismissed.
    pub fn show_toast(&self, message: &str, severity: Severity) -> NodeId {
        let container = self.create_toast_container();

        let toast = self.dom.create_element("div");
        self.dom.set_attribute(
            toast,
            "class",
            &format!("alert alert-{} alert-dismissible fade show", alert_kind(severity)),
        );
        self.dom.set_attribute(toast, "role", "alert");
        self.dom.set_text(toast, message);

        let close = self.dom.create_element("button");
        self.dom.set_attribute(close, "type", "button");
        self.dom.set_attribute(close, "class", "btn-close");
        self.dom.set_attribute(close, "data-bs-dismiss", "alert");
        self.dom.append_child(toast, close);

        self.dom.append_child(container, toast);
        debug!(%severity, text = message, "toast shown");

        self.schedule_removal(toast);
        toast
    }

    /// Toasts currently in the container, oldest first.
    pub fn active_toasts(&self) -> Vec<NodeId> {
        self.dom
            .element_by_id(TOAST_CONTAINER_ID)
            .map(|c| self.dom.children(c))
            .unwrap_or_default()
    }

    fn schedule_removal(&self, toast: NodeId) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime; toast will not expire");
            return;
        };
        let dom = Arc::clone(&self.dom);
        handle.spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            if dom.parent(toast).is_some() {
                dom.discard(toast);
            }
        });
    }
}

impl Notifier for Toaster {
    fn notify(&self, message: &str, severity: Severity) {
        self.show_toast(message, severity);
    }
}
