//! Subcommand handlers.
//!
//! Each handler receives its parsed arguments, the loaded [`AppConfig`] and
//! an [`OutputManager`]; the wiring of concrete adapters into core services
//! lives here so handlers stay small.

use std::sync::Arc;

use brickwork_adapters::{GitFetcher, LocalFilesystem, SerdeManifestCodec, SystemCommandRunner};
use brickwork_core::application::{InstallService, IntegrationService};

use crate::{cli::GlobalArgs, config::AppConfig};

pub mod apply;
pub mod completions;
pub mod config;
pub mod diff;
pub mod init;
pub mod install;
pub mod list;
pub mod plan;

/// Integration service over the real filesystem and process runner.
pub(crate) fn integration_service(global: &GlobalArgs, config: &AppConfig) -> IntegrationService {
    IntegrationService::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(SerdeManifestCodec::new()),
        Arc::new(SystemCommandRunner::new()),
        config.target(&global.project),
        config.hooks(),
    )
}

pub(crate) fn install_service(global: &GlobalArgs, config: &AppConfig) -> InstallService {
    InstallService::new(
        integration_service(global, config),
        Box::new(GitFetcher::new()),
        &config.project.bricks_dir,
    )
}
