//! `brickwork init`: write a default `brickwork.toml` into the project root.

use tracing::instrument;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, PROJECT_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(force = args.force))]
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = global.project.join(PROJECT_CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(CliError::ConfigExists { path: config_path });
    }

    let toml = toml::to_string_pretty(&AppConfig::template()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    std::fs::create_dir_all(&global.project).with_cli_context(|| {
        format!("Failed to create project directory '{}'", global.project.display())
    })?;
    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}
