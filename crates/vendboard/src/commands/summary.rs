//! `vendboard summary`

use vendboard_api::SummaryQuery;
use vendboard_core::{Dashboard, MemoryDom};

use crate::cli::{GlobalOpts, SummaryArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    dashboard: &Dashboard,
    dom: &MemoryDom,
    args: SummaryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = SummaryQuery {
        from: args.from,
        to: args.to,
        merchant_id: args.merchant,
    };
    let summary = dashboard.load_summary(&query).await?;
    output::print_summary(global.output, dom, &summary)
}
