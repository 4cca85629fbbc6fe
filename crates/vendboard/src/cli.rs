//! Clap derive structures for the `vendboard` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vendboard -- admin dashboard for a vending-machine fleet
#[derive(Debug, Parser)]
#[command(
    name = "vendboard",
    version,
    about = "Browse devices, orders, materials and sales KPIs of a vending fleet",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API base URL (overrides config file and VENDBOARD_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, env = "VENDBOARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered markup / human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List devices and render the device table
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Show dashboard KPIs and seven-day trends
    Summary(SummaryArgs),

    /// List, inspect and refund orders
    Orders(OrdersArgs),

    /// Manage the material dictionary and device bins
    #[command(alias = "mat")]
    Materials(MaterialsArgs),

    /// Check API health
    Health,

    /// Re-render the device table on the auto-refresh timer
    Watch(WatchArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DeviceFilterArgs {
    /// Filter by status (online, offline, maintenance, error)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by merchant id
    #[arg(long)]
    pub merchant: Option<String>,

    /// Filter by model
    #[arg(long)]
    pub model: Option<String>,

    /// Free-text search over id and alias
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(flatten)]
    pub filter: DeviceFilterArgs,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Range start (YYYYMMDD)
    #[arg(long)]
    pub from: Option<String>,

    /// Range end (YYYYMMDD)
    #[arg(long)]
    pub to: Option<String>,

    /// Restrict to one merchant
    #[arg(long)]
    pub merchant: Option<String>,
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders and render the order table
    #[command(alias = "ls")]
    List(OrderFilterArgs),

    /// Show one order
    Get {
        /// Order id
        order_id: String,
    },

    /// Refund a paid order
    Refund {
        /// Order id
        order_id: String,
    },

    /// Request an export of the matching orders
    Export(OrderFilterArgs),

    /// Request a receipt for one order
    Receipt {
        /// Order id
        order_id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct OrderFilterArgs {
    /// Only orders from this device
    #[arg(long)]
    pub device: Option<String>,

    /// Filter by merchant id
    #[arg(long)]
    pub merchant: Option<String>,

    /// Range start (YYYYMMDD)
    #[arg(long)]
    pub from: Option<String>,

    /// Range end (YYYYMMDD)
    #[arg(long)]
    pub to: Option<String>,

    /// Filter by payment status (paid, unpaid, refunded)
    #[arg(long)]
    pub payment_status: Option<String>,

    /// Filter by order status (completed, cancelled, ...)
    #[arg(long)]
    pub order_status: Option<String>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,
}

// ── Materials ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MaterialsArgs {
    #[command(subcommand)]
    pub command: MaterialsCommand,
}

#[derive(Debug, Subcommand)]
pub enum MaterialsCommand {
    /// List the material dictionary
    #[command(alias = "ls")]
    List,

    /// Add a material
    Create {
        /// Unique material code
        #[arg(long)]
        code: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Material type (server default: other)
        #[arg(long = "type")]
        kind: Option<String>,

        /// Unit of measure (server default: g)
        #[arg(long)]
        unit: Option<String>,
    },

    /// Change fields of a material
    Update {
        /// Material code
        code: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New material type
        #[arg(long = "type")]
        kind: Option<String>,

        /// New unit of measure
        #[arg(long)]
        unit: Option<String>,

        /// Enable or disable the material
        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Remove a material
    #[command(alias = "rm")]
    Delete {
        /// Material code
        code: String,
    },

    /// Show the material bins of a device
    Bins {
        /// Device id
        device_id: String,
    },

    /// Configure one bin of a device
    SetBin(SetBinArgs),

    /// Ask a device to report its material levels
    Sync {
        /// Device id
        device_id: String,
    },
}

#[derive(Debug, Args)]
pub struct SetBinArgs {
    /// Device id
    pub device_id: String,

    /// Bin index on the device
    #[arg(long)]
    pub bin: u32,

    /// Material code loaded into the bin
    #[arg(long)]
    pub material: String,

    /// Amount currently in the bin
    #[arg(long, default_value_t = 0.0)]
    pub remaining: f64,

    /// Bin capacity
    #[arg(long, default_value_t = 0.0)]
    pub capacity: f64,

    /// Low-level warning threshold, percent of capacity
    #[arg(long, default_value_t = 20.0)]
    pub threshold: f64,
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub filter: DeviceFilterArgs,

    /// Stop after this many timer-driven refreshes (default: run until Ctrl-C)
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Refresh interval in milliseconds (defaults to the configured interval)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
