//! `brickwork config`: inspect the resolved configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::{AppConfig, PROJECT_CONFIG_FILE},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            if let Some(user) = AppConfig::config_path() {
                output.print(&format!("user:    {}", user.display()))?;
            }
            output.print(&format!(
                "project: {}",
                global.project.join(PROJECT_CONFIG_FILE).display()
            ))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key (`project.settings`, `hooks.install`) in the
/// resolved configuration.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let unknown = || CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };

    let root = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let value = key
        .split('.')
        .try_fold(&root, |node, part| node.get(part))
        .ok_or_else(unknown)?;

    match value {
        Value::Object(_) => Err(unknown()),
        Value::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
