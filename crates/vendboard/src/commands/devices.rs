//! `vendboard devices`

use vendboard_api::DeviceQuery;
use vendboard_core::{Dashboard, MemoryDom};

use crate::cli::{DeviceFilterArgs, DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn to_query(filter: &DeviceFilterArgs) -> DeviceQuery {
    DeviceQuery {
        merchant_id: filter.merchant.clone(),
        status: filter.status.clone(),
        model: filter.model.clone(),
        query: filter.query.clone(),
        page: filter.page,
        page_size: filter.page_size,
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    dom: &MemoryDom,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let list = dashboard.load_devices(&to_query(&args.filter)).await?;
    output::print_devices(global.output, dom, &list)
}
