//! Error-surfacing seam between the request client and whatever shows
//! messages to the user (the DOM toast surface, a terminal, a log).

use strum::{AsRefStr, Display, EnumString};
use tracing::{error, info, warn};

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Error,
    Success,
    Warning,
}

/// Receives user-facing messages.
///
/// The request client calls [`notify`](Notifier::notify) on every failure
/// path before returning the error to its caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Notifier that only writes to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => error!(target: "vendboard::notify", "{message}"),
            Severity::Warning => warn!(target: "vendboard::notify", "{message}"),
            Severity::Info | Severity::Success => info!(target: "vendboard::notify", "{message}"),
        }
    }
}
