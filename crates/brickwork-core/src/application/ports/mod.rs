//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `brickwork-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations on the target project and bricks
//!   - `ManifestCodec`: YAML/JSON manifest (de)serialization
//!   - `CommandRunner`: Dependency installer and schema migrator
//!   - `RepoFetcher`: Cloning remote bricks into scoped checkouts
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Checkout, CommandRunner, CommandStatus, ExternalCommand, Filesystem, ManifestCodec,
    RepoFetcher,
};
