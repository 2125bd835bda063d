//! `brickwork list`: print or export the ledger.

use tracing::{debug, instrument};

use crate::{
    cli::{GlobalArgs, ListArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::integration_service(&global, &config);
    let ledger = service.ledger().load()?;
    debug!(entries = ledger.len(), path = %service.ledger().path().display(), "Ledger loaded");

    let json = ledger.to_json(args.compact);
    match args.output {
        Some(path) => {
            std::fs::write(&path, format!("{json}\n"))
                .with_cli_context(|| format!("Failed to write ledger to '{}'", path.display()))?;
            output.success(&format!(
                "Wrote {} ledger entr{} to {}",
                ledger.len(),
                if ledger.len() == 1 { "y" } else { "ies" },
                path.display()
            ))?;
        }
        // The ledger JSON is the payload; it is printed even in quiet mode.
        None => println!("{json}"),
    }
    Ok(())
}
