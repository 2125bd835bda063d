// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through the install fallback as values)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Manifest Errors
    // ========================================================================
    #[error("No brick manifest found in {dir} (looked for brick.yaml, brick.yml, brick.json)")]
    ManifestNotFound { dir: PathBuf },

    #[error("Invalid brick manifest {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    // ========================================================================
    // Repository Reference Errors
    // ========================================================================
    #[error("Unrecognized repository reference '{input}'")]
    UnrecognizedRepoFormat { input: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestNotFound { dir } => vec![
                format!("No manifest in {}", dir.display()),
                "Add a brick.yaml (or brick.yml / brick.json) to the brick directory".into(),
                "Check that the path points at the brick root, not the module inside it".into(),
            ],
            Self::ManifestInvalid { reason, .. } => vec![
                format!("Parser said: {}", reason),
                "The manifest must be a YAML or JSON object".into(),
            ],
            Self::UnrecognizedRepoFormat { input } => vec![
                format!("'{}' is neither a URL nor owner/name", input),
                "Examples: https://github.com/acme/blog-brick, acme/blog-brick".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
            Self::ManifestInvalid { .. } | Self::UnrecognizedRepoFormat { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
