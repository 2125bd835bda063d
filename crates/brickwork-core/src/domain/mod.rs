//! Core domain layer for Brickwork.
//!
//! Pure logic only: no filesystem, processes or network. Everything that
//! touches the outside world goes through the ports in
//! [`crate::application::ports`].
//!
//! - [`manifest`]: on-disk document and normalized [`Manifest`]
//! - [`plan`]: the pure [`compile`] function and [`Plan`]
//! - [`mutators`]: textual, idempotent edits over [`TextDocument`]
//! - [`ledger`]: provenance records
//! - [`repo`]: repository reference normalization
pub mod action;
pub mod demo_brick;
pub mod error;
pub mod ledger;
pub mod manifest;
pub mod mutators;
pub mod plan;
pub mod repo;
pub mod target;
pub mod text;

pub use action::{Action, ActionKind};
pub use error::{DomainError, ErrorCategory};
pub use ledger::{Ledger, LedgerEntry};
pub use manifest::{
    EnvKey, MANIFEST_CANDIDATES, Manifest, ManifestDocument, ManifestFormat, RouteSpec,
};
pub use mutators::IntegrationWarning;
pub use plan::{Plan, compile};
pub use repo::RepoRef;
pub use target::TargetProject;
pub use text::TextDocument;
