//! `brickwork plan`: print the compiled plan of a local brick.

use tracing::instrument;

use crate::{
    cli::{BrickArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(
    args: BrickArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::integration_service(&global, &config);
    let brick = service.prepare(&args.path)?;

    if output.is_json() {
        output.json(&brick.plan)?;
    } else {
        output.header(&format!("Plan for {}", brick.manifest.name))?;
        output.print(&brick.plan.to_pretty_json())?;
    }
    Ok(())
}
