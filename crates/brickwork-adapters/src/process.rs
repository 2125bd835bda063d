//! External command runner using std::process.

use std::io;
use std::process::{Command, Stdio};

use brickwork_core::application::ports::{CommandRunner, CommandStatus, ExternalCommand};
use tracing::debug;

/// Runs hooks as child processes with inherited stdout/stderr so the
/// operator sees installer and migrator output as it happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &ExternalCommand) -> io::Result<CommandStatus> {
        debug!(%command, cwd = %command.cwd.display(), "Spawning");
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::null())
            .status()?;
        Ok(CommandStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn command(program: &str, args: &[&str]) -> ExternalCommand {
        ExternalCommand {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: PathBuf::from("/"),
        }
    }

    #[test]
    fn reports_exit_status() {
        let runner = SystemCommandRunner::new();
        assert!(runner.run(&command("true", &[])).unwrap().success);
        let failed = runner.run(&command("sh", &["-c", "exit 3"])).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
    }

    #[test]
    fn missing_program_is_io_error() {
        let runner = SystemCommandRunner::new();
        assert!(runner.run(&command("brickwork-no-such-binary", &[])).is_err());
    }
}
