//! `vendboard watch`: the devices page with auto-refresh.
//!
//! Renders once up front, then re-renders on every timer tick until the
//! requested number of ticks has passed or Ctrl-C is pressed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use vendboard_core::{Dashboard, MemoryDom, refresh_callback};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::commands::devices::to_query;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    dashboard: &Dashboard,
    dom: &Arc<MemoryDom>,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = to_query(&args.filter);
    let format = global.output;

    let list = dashboard.load_devices(&query).await?;
    output::print_devices(format, dom, &list)?;

    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<()>();
    let callback = {
        let dashboard = dashboard.clone();
        let dom = Arc::clone(dom);
        refresh_callback(move || {
            let dashboard = dashboard.clone();
            let dom = Arc::clone(&dom);
            let query = query.clone();
            let tick_tx = tick_tx.clone();
            async move {
                match dashboard.load_devices(&query).await {
                    Ok(list) => {
                        if let Err(e) = output::print_devices(format, &dom, &list) {
                            warn!(error = %e, "could not print devices");
                        }
                    }
                    Err(e) => warn!(error = %e, "refresh failed"),
                }
                output::flush_toasts(&dashboard, &dom);
                let _ = tick_tx.send(());
            }
        })
    };

    dashboard.start_auto_refresh(callback, args.interval_ms.map(Duration::from_millis));

    let mut completed: u32 = 0;
    while args.ticks.is_none_or(|limit| completed < limit) {
        tokio::select! {
            tick = tick_rx.recv() => {
                if tick.is_none() {
                    break;
                }
                completed += 1;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    dashboard.stop_auto_refresh();
    info!(ticks = completed, "watch finished");
    Ok(())
}
