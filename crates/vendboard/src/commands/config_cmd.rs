//! Config subcommand handlers.

use vendboard_config::{Config, ConfigError};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;
use crate::{config_file, effective_config};

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = effective_config(global)?;
            match global.output {
                OutputFormat::Json => output::print_json(&cfg),
                OutputFormat::Text => {
                    let text = toml::to_string_pretty(&cfg).map_err(ConfigError::from)?;
                    print!("{text}");
                    Ok(())
                }
            }
        }

        ConfigCommand::Path => {
            println!("{}", config_file(global).display());
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config_file(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            vendboard_config::save_config_to(&Config::default(), &path)?;
            eprintln!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}
