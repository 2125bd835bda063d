//! Infrastructure adapters for Brickwork.
//!
//! This crate implements the ports defined in `brickwork-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod codec;
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used adapters
pub use codec::SerdeManifestCodec;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use git::{GitFetcher, TempCheckout};
pub use process::SystemCommandRunner;
