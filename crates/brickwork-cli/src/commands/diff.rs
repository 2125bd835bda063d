//! `brickwork diff`: print the plan and the lines `apply` would add.

use serde_json::json;
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
    let preview = service.preview(&brick)?;

    if output.is_json() {
        output.json(&json!({ "plan": brick.plan, "preview": preview }))?;
        return Ok(());
    }

    output.header(&format!("Plan for {}", brick.manifest.name))?;
    output.print(&brick.plan.to_pretty_json())?;
    output.header("Additions")?;
    output.print(preview.render().trim_end())?;
    Ok(())
}
