// ── Auto-refresh ──
//
// One periodic timer per `AutoRefresh`. Starting a timer cancels the previous
// one, so at most one is ever live. Ticks spawn the callback without waiting
// for the previous run: a slow refresh and the next tick may overlap.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::BoxFuture;
use strum::Display;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Shortest interval a timer will run at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Page-supplied reload routine.
pub type RefreshCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Wrap an async closure as a [`RefreshCallback`].
pub fn refresh_callback<F, Fut>(f: F) -> RefreshCallback
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

struct RefreshTimer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
    interval: Duration,
}

/// Single-timer periodic refresh controller.
///
/// `start` and `stop` must be called from within a tokio runtime.
pub struct AutoRefresh {
    default_interval: Duration,
    timer: Mutex<Option<RefreshTimer>>,
}

impl fmt::Debug for AutoRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoRefresh")
            .field("default_interval", &self.default_interval)
            .field("interval", &self.interval())
            .finish()
    }
}

impl AutoRefresh {
    pub fn new(default_interval: Duration) -> Self {
        Self {
            default_interval,
            timer: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<RefreshTimer>> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn default_interval(&self) -> Duration {
        self.default_interval
    }

    /// Run `callback` every `interval` (default: the configured interval),
    /// replacing any running timer. The first run happens one full interval
    /// from now.
    pub fn start(&self, callback: RefreshCallback, interval: Option<Duration>) {
        let period = interval.unwrap_or(self.default_interval).max(MIN_INTERVAL);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(timer_task(callback, period, cancel.clone()));

        let previous = self.slot().replace(RefreshTimer {
            cancel,
            handle,
            interval: period,
        });
        if let Some(old) = previous {
            old.cancel.cancel();
            debug!("previous auto-refresh timer cancelled");
        }
        info!(interval_ms = period.as_millis(), "auto-refresh started");
    }

    /// Cancel future ticks. Returns `false` if no timer was running.
    ///
    /// A callback that is already executing runs to completion.
    pub fn stop(&self) -> bool {
        let Some(timer) = self.slot().take() else {
            return false;
        };
        timer.cancel.cancel();
        info!("auto-refresh stopped");
        true
    }

    pub fn is_active(&self) -> bool {
        self.slot()
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished() && !t.cancel.is_cancelled())
    }

    /// Interval of the running timer, if any.
    pub fn interval(&self) -> Option<Duration> {
        self.slot().as_ref().map(|t| t.interval)
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        if let Some(timer) = self.slot().take() {
            timer.cancel.cancel();
        }
    }
}

async fn timer_task(callback: RefreshCallback, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                tokio::spawn(callback());
            }
        }
    }
}

// ── Visibility ───────────────────────────────────────────────────────

/// Page visibility as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Pauses auto-refresh while the page is hidden.
///
/// On becoming visible the registered page refresh runs once right away,
/// then the periodic timer restarts with it.
pub struct VisibilityObserver {
    refresh: Arc<AutoRefresh>,
    page_refresh: Mutex<Option<RefreshCallback>>,
}

impl fmt::Debug for VisibilityObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityObserver")
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl VisibilityObserver {
    pub fn new(refresh: Arc<AutoRefresh>) -> Self {
        Self {
            refresh,
            page_refresh: Mutex::new(None),
        }
    }

    fn page_slot(&self) -> MutexGuard<'_, Option<RefreshCallback>> {
        self.page_refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the callback the current page wants re-run on refresh.
    pub fn register_page_refresh(&self, callback: RefreshCallback) {
        *self.page_slot() = Some(callback);
    }

    pub fn clear_page_refresh(&self) {
        *self.page_slot() = None;
    }

    pub fn on_visibility_change(&self, visibility: Visibility) {
        debug!(%visibility, "page visibility changed");
        match visibility {
            Visibility::Hidden => {
                self.refresh.stop();
            }
            Visibility::Visible => {
                let Some(callback) = self.page_slot().clone() else {
                    return;
                };
                tokio::spawn(callback());
                self.refresh.start(callback, None);
            }
        }
    }

    /// Follow a visibility channel until its sender is dropped.
    pub fn watch(self: Arc<Self>, mut rx: watch::Receiver<Visibility>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let visibility = *rx.borrow_and_update();
                self.on_visibility_change(visibility);
            }
        })
    }
}
