//! `vendboard health`

use vendboard_core::{CoreError, Dashboard};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let health = dashboard.api().health().await.map_err(CoreError::from)?;
    output::print_health(global.output, &health)
}
