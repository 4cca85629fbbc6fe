//! Command dispatch: bridges CLI args -> dashboard calls -> output.

pub mod config_cmd;
pub mod devices;
pub mod health;
pub mod materials;
pub mod orders;
pub mod summary;
pub mod watch;

use std::sync::Arc;

use vendboard_core::{Dashboard, MemoryDom};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    dom: &Arc<MemoryDom>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(dashboard, dom, args, global).await,
        Command::Summary(args) => summary::handle(dashboard, dom, args, global).await,
        Command::Orders(args) => orders::handle(dashboard, dom, args, global).await,
        Command::Materials(args) => materials::handle(dashboard, dom, args, global).await,
        Command::Health => health::handle(dashboard, global).await,
        Command::Watch(args) => watch::handle(dashboard, dom, args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
    }
}
