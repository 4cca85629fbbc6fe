mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vendboard_config::Config;
use vendboard_core::{
    BINS_TABLE_ID, DEVICES_TABLE_ID, Dashboard, Dom, MATERIALS_TABLE_ID, MemoryDom,
    ONLINE_RATE_CHART_ID, ORDERS_TABLE_ID, SALES_CHART_ID,
};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never talk to the API
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let cfg = effective_config(&cli.global)?;
            let (dashboard, dom) = build_dashboard(&cfg)?;
            tracing::debug!(command = ?cmd, api_base = %cfg.api_base, "dispatching command");

            let result = commands::dispatch(cmd, &dashboard, &dom, &cli.global).await;
            output::flush_toasts(&dashboard, &dom);
            result
        }
    }
}

/// Config file + environment, with `--api-base` applied on top.
fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_file(global);
    let mut cfg = vendboard_config::load_config_from(&path)?;
    if let Some(ref base) = global.api_base {
        cfg.api_base.clone_from(base);
        cfg.validate()?;
    }
    Ok(cfg)
}

fn config_file(global: &GlobalOpts) -> std::path::PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(vendboard_config::config_path)
}

/// A dashboard over an in-memory page holding every table and chart
/// canvas the commands render into.
fn build_dashboard(cfg: &Config) -> Result<(Dashboard, Arc<MemoryDom>), CliError> {
    let dom = Arc::new(MemoryDom::new());
    for id in [DEVICES_TABLE_ID, ORDERS_TABLE_ID, MATERIALS_TABLE_ID, BINS_TABLE_ID] {
        dom.append_element(dom.body(), "table", &[("id", id)]);
    }
    for id in [SALES_CHART_ID, ONLINE_RATE_CHART_ID] {
        dom.append_element(dom.body(), "canvas", &[("id", id)]);
    }
    let dashboard = Dashboard::new(cfg.to_dashboard_config(), dom.clone())?;
    Ok((dashboard, dom))
}
