//! Brickwork Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Brickwork, a
//! tool that integrates reusable feature packages ("bricks") into a web
//! project by editing its text files in place.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          brickwork-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (IntegrationService, InstallService)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Codec, Runner, Fetcher)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    brickwork-adapters (Infrastructure)  │
//! │ (LocalFilesystem, GitFetcher, etc)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │   (Manifest, Plan, Mutators, Ledger)    │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brickwork_core::prelude::*;
//!
//! let service = IntegrationService::new(
//!     filesystem,
//!     codec,
//!     runner,
//!     TargetProject::new("."),
//!     Hooks::default(),
//! );
//! let brick = service.prepare(Path::new("bricks/blog"))?;
//! let report = service.apply(&brick, "bricks/blog")?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyReport, DiffPreview, Hooks, InstallOrigin, InstallOutcome, InstallService,
        IntegrationService, PreparedBrick,
        ports::{Checkout, CommandRunner, Filesystem, ManifestCodec, RepoFetcher},
    };
    pub use crate::domain::{
        Action, ActionKind, IntegrationWarning, Ledger, LedgerEntry, Manifest, Plan, RepoRef,
        TargetProject,
    };
    pub use crate::error::{BrickworkError, BrickworkResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
