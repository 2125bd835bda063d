//! `brickwork install`: fetch a brick from a repository and apply it.
//!
//! A failed fetch or detection is not an error here: the core service falls
//! back to the demo brick and this handler reports that as a warning.

use brickwork_core::application::InstallOrigin;
use tracing::instrument;

use crate::{
    cli::{GlobalArgs, InstallArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(repo = %args.repo))]
pub fn execute(
    args: InstallArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::install_service(&global, &config);

    let spinner = output.spinner(format!("Installing {}", args.repo));
    let result = service.install(&args.repo);
    spinner.finish_and_clear();
    let outcome = result?;

    if output.is_json() {
        output.json(&outcome.report.entry)?;
        return Ok(());
    }

    match &outcome.origin {
        InstallOrigin::Remote { url } => output.info(&format!("Installed from {url}"))?,
        InstallOrigin::Fallback { reason, demo_dir } => {
            output.warning(&format!("Could not install {}: {reason}", args.repo))?;
            output.warning(&format!(
                "Applied the demo brick from {} instead",
                demo_dir.display()
            ))?;
        }
    }
    super::apply::print_report(&output, &outcome.report)?;
    Ok(())
}
