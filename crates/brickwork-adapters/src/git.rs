//! Repository fetcher shelling out to `git`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use brickwork_core::{
    application::{
        ApplicationError,
        ports::{Checkout, RepoFetcher},
    },
    domain::RepoRef,
    error::BrickworkResult,
};
use tempfile::TempDir;
use tracing::{debug, instrument};

/// A clone living inside a temporary directory. Dropping it deletes the
/// directory.
#[derive(Debug)]
pub struct TempCheckout {
    _dir: TempDir,
    path: PathBuf,
}

impl Checkout for TempCheckout {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Clones with `git clone --depth 1` into a fresh temporary directory.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl GitFetcher {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a different git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoFetcher for GitFetcher {
    #[instrument(skip(self), fields(url = %repo.url()))]
    fn fetch(&self, repo: &RepoRef) -> BrickworkResult<Box<dyn Checkout>> {
        let clone_failed = |reason: String| ApplicationError::CloneFailed {
            repo: repo.url().to_string(),
            reason,
        };

        let dir = tempfile::Builder::new()
            .prefix("brickwork-")
            .tempdir()
            .map_err(|e| clone_failed(format!("cannot create temporary directory: {e}")))?;
        let path = dir.path().join(repo.repo_name());

        let output = Command::new(&self.program)
            .args(["clone", "--depth", "1", "--quiet"])
            .arg(repo.url())
            .arg(&path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| clone_failed(format!("cannot run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(clone_failed(if stderr.is_empty() {
                format!("git exited with {}", output.status)
            } else {
                stderr
            })
            .into());
        }

        debug!(path = %path.display(), "Cloned");
        Ok(Box::new(TempCheckout { _dir: dir, path }))
    }
}
