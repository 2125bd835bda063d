//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "apply a brick" or "install from a repo".

pub mod install_service;
pub mod integration_service;
pub mod ledger_store;
pub mod manifest_reader;
pub mod preview;

pub use install_service::{InstallOrigin, InstallOutcome, InstallService};
pub use integration_service::{ApplyReport, Hooks, IntegrationService, PreparedBrick};
pub use ledger_store::LedgerHandle;
pub use manifest_reader::ManifestReader;
pub use preview::{DiffPreview, PreviewSection};
