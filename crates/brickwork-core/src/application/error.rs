//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not manifest
//! content. Manifest and reference problems are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while planning, applying or installing a brick.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The ledger file exists but cannot be decoded.
    #[error("Ledger at {path} is corrupt: {reason}")]
    LedgerCorrupt { path: PathBuf, reason: String },

    /// The ledger guard was poisoned by a panic in another thread.
    #[error("Ledger lock poisoned")]
    LedgerLockPoisoned,

    /// A synthesized manifest could not be encoded.
    #[error("Could not encode manifest: {reason}")]
    ManifestEncodeFailed { reason: String },

    /// Cloning the remote repository failed.
    #[error("Clone of {repo} failed: {reason}")]
    CloneFailed { repo: String, reason: String },

    /// The checkout holds neither a manifest nor a recognizable module.
    #[error("No brick manifest or module detected under {root}")]
    NoBrickDetected { root: PathBuf },

    /// The dependency installer exited unsuccessfully.
    #[error("Dependency installation failed ({command}): {reason}")]
    DependencyInstallFailed { command: String, reason: String },

    /// The schema migrator exited unsuccessfully.
    #[error("Migration failed ({command}): {reason}")]
    MigrationFailed { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the project root points at the right directory (--project)".into(),
            ],
            Self::LedgerCorrupt { path, .. } => vec![
                format!("Inspect or restore {}", path.display()),
                "The ledger must be a JSON object with an \"entries\" array".into(),
            ],
            Self::CloneFailed { repo, .. } => vec![
                format!("Could not clone {}", repo),
                "Check the URL and your network access".into(),
                "Ensure git is installed and in your PATH".into(),
            ],
            Self::NoBrickDetected { .. } => vec![
                "The repository needs a brick.yaml or a module with an apps.py".into(),
            ],
            Self::DependencyInstallFailed { .. } => vec![
                "The project files were changed but no ledger entry was written".into(),
                "Fix the installer error, then re-run apply; mutations are idempotent".into(),
                "Set [hooks] install = [] in brickwork.toml to skip installation".into(),
            ],
            Self::MigrationFailed { .. } => vec![
                "The project files were changed but no ledger entry was written".into(),
                "Fix the migration error, then re-run apply; mutations are idempotent".into(),
                "Set [hooks] migrate = [] in brickwork.toml to skip migrations".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoBrickDetected { .. } => ErrorCategory::NotFound,
            Self::CloneFailed { .. } => ErrorCategory::NotFound,
            Self::LedgerCorrupt { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::LedgerLockPoisoned
            | Self::ManifestEncodeFailed { .. }
            | Self::DependencyInstallFailed { .. }
            | Self::MigrationFailed { .. } => ErrorCategory::Internal,
        }
    }
}
