//! Application layer for Brickwork.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (IntegrationService, InstallService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! integration rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ApplyReport, DiffPreview, Hooks, InstallOrigin, InstallOutcome, InstallService,
    IntegrationService, LedgerHandle, ManifestReader, PreparedBrick,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Checkout, CommandRunner, Filesystem, ManifestCodec, RepoFetcher};

pub use error::ApplicationError;
