//! `vendboard materials`

use vendboard_api::{BinConfig, MaterialUpdate, NewMaterial};
use vendboard_core::{CoreError, Dashboard, MemoryDom};

use crate::cli::{GlobalOpts, MaterialsArgs, MaterialsCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    dashboard: &Dashboard,
    dom: &MemoryDom,
    args: MaterialsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = dashboard.api();
    let ack = match args.command {
        MaterialsCommand::List => {
            let materials = dashboard.load_materials().await?;
            return output::print_materials(global.output, dom, &materials);
        }
        MaterialsCommand::Bins { device_id } => {
            let bins = dashboard.load_device_bins(&device_id).await?;
            return output::print_bins(global.output, dom, &bins);
        }

        MaterialsCommand::Create {
            code,
            name,
            kind,
            unit,
        } => {
            let material = NewMaterial {
                code,
                name,
                kind,
                unit,
            };
            api.create_material(&material).await
        }
        MaterialsCommand::Update {
            code,
            name,
            kind,
            unit,
            enabled,
        } => {
            let update = MaterialUpdate {
                name,
                kind,
                unit,
                enabled,
            };
            if update.name.is_none()
                && update.kind.is_none()
                && update.unit.is_none()
                && update.enabled.is_none()
            {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "pass at least one of --name, --type, --unit, --enabled".into(),
                });
            }
            api.update_material(&code, &update).await
        }
        MaterialsCommand::Delete { code } => api.delete_material(&code).await,
        MaterialsCommand::SetBin(bin) => {
            if bin.capacity < 0.0 || bin.remaining < 0.0 {
                return Err(CliError::Validation {
                    field: "bin".into(),
                    reason: "remaining and capacity must not be negative".into(),
                });
            }
            let config = BinConfig {
                bin_index: bin.bin,
                material_code: bin.material,
                remaining: bin.remaining,
                capacity: bin.capacity,
                threshold_low_pct: bin.threshold,
            };
            api.update_device_bins(&bin.device_id, &[config]).await
        }
        MaterialsCommand::Sync { device_id } => api.sync_device_materials(&device_id).await,
    }
    .map_err(CoreError::from)?;

    output::print_message(global.output, &ack)
}
