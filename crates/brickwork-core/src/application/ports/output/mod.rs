//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `brickwork-adapters` crate provides implementations.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{ManifestDocument, ManifestFormat, RepoRef, TargetProject};
use crate::error::BrickworkResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `brickwork_adapters::filesystem::LocalFilesystem` (production)
/// - `brickwork_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> BrickworkResult<String>;

    /// Write content to a file, replacing it. The parent must exist.
    fn write_file(&self, path: &Path, content: &str) -> BrickworkResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BrickworkResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Recursively copy a directory tree. `to` must not exist yet.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> BrickworkResult<()>;

    /// Absolute form of an existing path with `.` and `..` resolved.
    fn canonicalize(&self, path: &Path) -> BrickworkResult<PathBuf>;

    /// Every file below `root`, sorted, excluding anything inside `.git`.
    fn list_files(&self, root: &Path) -> BrickworkResult<Vec<PathBuf>>;
}

/// Port for decoding and encoding manifest documents.
///
/// Implemented by `brickwork_adapters::SerdeManifestCodec`. Errors are the
/// parser's message; the caller attaches the file path.
pub trait ManifestCodec: Send + Sync {
    fn decode(&self, format: ManifestFormat, text: &str) -> Result<ManifestDocument, String>;

    fn encode(&self, format: ManifestFormat, document: &ManifestDocument)
    -> Result<String, String>;
}

/// An external program invocation (dependency installer, schema migrator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ExternalCommand {
    /// Build a command from a configured argv, substituting `{root}` and
    /// `{requirements}`. An empty argv means the hook is disabled.
    pub fn from_template(argv: &[String], target: &TargetProject) -> Option<Self> {
        let root = target.root().display().to_string();
        let requirements = target.requirements_path().display().to_string();
        let mut parts = argv.iter().map(|arg| {
            arg.replace("{root}", &root)
                .replace("{requirements}", &requirements)
        });
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            cwd: target.root().to_path_buf(),
        })
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How an external command finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStatus {
    pub success: bool,
    pub code: Option<i32>,
}

/// Port for running external programs.
///
/// Implemented by `brickwork_adapters::SystemCommandRunner`. An `Err` means
/// the program could not be started at all.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &ExternalCommand) -> io::Result<CommandStatus>;
}

/// A local checkout of a remote repository.
///
/// The checkout directory is removed when the value is dropped, on success
/// and failure alike.
pub trait Checkout: Send {
    fn path(&self) -> &Path;
}

/// Port for fetching remote repositories.
///
/// Implemented by `brickwork_adapters::GitFetcher`.
pub trait RepoFetcher: Send + Sync {
    fn fetch(&self, repo: &RepoRef) -> BrickworkResult<Box<dyn Checkout>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_substituted() {
        let target = TargetProject::new("/srv/site");
        let argv: Vec<String> = ["pip", "install", "-r", "{requirements}"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cmd = ExternalCommand::from_template(&argv, &target).unwrap();
        assert_eq!(cmd.program, "pip");
        assert_eq!(cmd.args.last().unwrap(), "/srv/site/requirements.txt");
        assert_eq!(cmd.cwd, PathBuf::from("/srv/site"));
        assert_eq!(
            cmd.to_string(),
            "pip install -r /srv/site/requirements.txt"
        );
    }

    #[test]
    fn empty_argv_disables_hook() {
        let target = TargetProject::new(".");
        assert!(ExternalCommand::from_template(&[], &target).is_none());
    }
}
