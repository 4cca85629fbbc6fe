//! `vendboard orders`

use vendboard_api::OrderQuery;
use vendboard_core::{CoreError, Dashboard, MemoryDom};

use crate::cli::{GlobalOpts, OrderFilterArgs, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output;

pub fn to_query(filter: OrderFilterArgs) -> OrderQuery {
    OrderQuery {
        device_id: filter.device,
        merchant_id: filter.merchant,
        from_date: filter.from,
        to_date: filter.to,
        payment_status: filter.payment_status,
        order_status: filter.order_status,
        page: filter.page,
        page_size: filter.page_size,
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    dom: &MemoryDom,
    args: OrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = dashboard.api();
    match args.command {
        OrdersCommand::List(filter) => {
            let list = dashboard.load_orders(&to_query(filter)).await?;
            output::print_orders(global.output, dom, &list)
        }
        OrdersCommand::Get { order_id } => {
            let order = api.get_order(&order_id).await.map_err(CoreError::from)?;
            output::print_order(global.output, &order)
        }
        OrdersCommand::Refund { order_id } => {
            let ack = api.refund_order(&order_id).await.map_err(CoreError::from)?;
            output::print_message(global.output, &ack)
        }
        OrdersCommand::Export(filter) => {
            let ack = api
                .export_orders(&to_query(filter))
                .await
                .map_err(CoreError::from)?;
            output::print_message(global.output, &ack)
        }
        OrdersCommand::Receipt { order_id } => {
            let ack = api.order_receipt(&order_id).await.map_err(CoreError::from)?;
            output::print_message(global.output, &ack)
        }
    }
}
