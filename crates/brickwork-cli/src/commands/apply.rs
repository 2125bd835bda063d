//! `brickwork apply`: print the plan and, with `--yes`, apply it.

use brickwork_core::application::ApplyReport;
use tracing::{info, instrument};

use crate::{
    cli::{ApplyArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.brick.path.display(), yes = args.yes))]
pub fn execute(
    args: ApplyArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::integration_service(&global, &config);
    let brick = service.prepare(&args.brick.path)?;

    if !args.yes {
        if output.is_json() {
            output.json(&brick.plan)?;
        } else {
            output.header(&format!("Plan for {}", brick.manifest.name))?;
            output.print(&brick.plan.to_pretty_json())?;
            output.info("Nothing was changed. Re-run with --yes to apply this plan.")?;
        }
        return Ok(());
    }

    let source = args.brick.path.display().to_string();
    let report = service.apply(&brick, &source)?;
    info!(brick = %report.entry.brick, actions = report.entry.actions.len(), "Applied");

    if output.is_json() {
        output.json(&report.entry)?;
    } else {
        output.header(&format!("Plan for {}", brick.manifest.name))?;
        output.print(&brick.plan.to_pretty_json())?;
        print_report(&output, &report)?;
    }
    Ok(())
}

/// Human summary of an apply: warnings, actions and hooks. Shared with
/// `install`.
pub(crate) fn print_report(output: &OutputManager, report: &ApplyReport) -> std::io::Result<()> {
    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
    }

    let entry = &report.entry;
    if report.is_noop() {
        output.success(&format!("{} is already integrated; nothing to do", entry.brick))?;
    } else {
        output.success(&format!(
            "Applied {} ({} action{})",
            entry.brick,
            entry.actions.len(),
            if entry.actions.len() == 1 { "" } else { "s" }
        ))?;
        for action in &entry.actions {
            output.detail(&format!("{}  {}", action.file, action.kind))?;
        }
    }

    for hook in &report.hooks_run {
        output.info(&format!("Ran {hook}"))?;
    }
    Ok(())
}
