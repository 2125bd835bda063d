//! Install service - fetch a remote brick and apply it.
//!
//! Flow: normalize the reference, clone into a scoped checkout, find or
//! synthesize a manifest, apply with the repository URL as source. Any
//! failure along the way switches to the built-in demo brick so the
//! operator always ends up with something integrated.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::RepoFetcher;
use crate::application::services::integration_service::{ApplyReport, IntegrationService};
use crate::domain::demo_brick::{self, DEMO_BRICK_NAME};
use crate::domain::manifest::{SYNTHESIZED_REQUIREMENTS_LIMIT, requirements_head};
use crate::domain::{MANIFEST_CANDIDATES, ManifestDocument, RepoRef, RouteSpec};
use crate::error::BrickworkResult;

/// File that marks a directory as an installable module.
const APP_DESCRIPTOR: &str = "apps.py";
const ROUTES_MODULE: &str = "urls.py";
const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Where the applied brick came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOrigin {
    Remote { url: String },
    Fallback { reason: String, demo_dir: PathBuf },
}

#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub origin: InstallOrigin,
    pub report: ApplyReport,
}

impl InstallOutcome {
    pub fn used_fallback(&self) -> bool {
        matches!(self.origin, InstallOrigin::Fallback { .. })
    }
}

pub struct InstallService {
    integration: IntegrationService,
    fetcher: Box<dyn RepoFetcher>,
    bricks_dir: PathBuf,
}

impl InstallService {
    /// `bricks_dir` is relative to the project root unless absolute.
    pub fn new(
        integration: IntegrationService,
        fetcher: Box<dyn RepoFetcher>,
        bricks_dir: impl AsRef<Path>,
    ) -> Self {
        let bricks_dir = integration.target().resolve(bricks_dir);
        Self {
            integration,
            fetcher,
            bricks_dir,
        }
    }

    pub fn integration(&self) -> &IntegrationService {
        &self.integration
    }

    /// Install from a repository reference, falling back to the demo brick.
    ///
    /// # Errors
    ///
    /// Any failure of the remote path, hooks included, switches to the demo
    /// brick. Hook failures while applying the demo become warnings; only
    /// filesystem or ledger failures of the fallback itself are returned.
    #[instrument(skip(self))]
    pub fn install(&self, reference: &str) -> BrickworkResult<InstallOutcome> {
        match self.install_remote(reference) {
            Ok((repo, report)) => Ok(InstallOutcome {
                origin: InstallOrigin::Remote {
                    url: repo.url().to_string(),
                },
                report,
            }),
            Err(error) => {
                warn!(%error, "Remote install failed, applying demo brick");
                let demo_dir = self.materialize_demo()?;
                let brick = self.integration.prepare(&demo_dir)?;
                let report = self
                    .integration
                    .apply_tolerating_hooks(&brick, &demo_dir.display().to_string())?;
                Ok(InstallOutcome {
                    origin: InstallOrigin::Fallback {
                        reason: error.to_string(),
                        demo_dir,
                    },
                    report,
                })
            }
        }
    }

    fn install_remote(&self, reference: &str) -> BrickworkResult<(RepoRef, ApplyReport)> {
        let repo = RepoRef::parse(reference)?;
        info!(url = %repo, "Fetching brick");

        // The checkout is removed when it goes out of scope.
        let checkout = self.fetcher.fetch(&repo)?;
        let brick_dir = self.locate_brick(checkout.path())?;
        let brick = self.integration.prepare(&brick_dir)?;
        let report = self.integration.apply(&brick, repo.url())?;
        Ok((repo, report))
    }

    /// Find the brick directory inside a checkout, synthesizing a manifest
    /// when the repository only carries a module.
    pub fn locate_brick(&self, root: &Path) -> BrickworkResult<PathBuf> {
        if self.integration.reader().locate(root).is_some() {
            return Ok(root.to_path_buf());
        }

        let fs = self.integration.filesystem();
        let files = fs.list_files(root)?;

        let manifest_dir = shallowest(files.iter().filter(|path| {
            file_name_is(path, |name| {
                MANIFEST_CANDIDATES.iter().any(|(candidate, _)| *candidate == name)
            })
        }))
        .and_then(|path| path.parent());
        if let Some(dir) = manifest_dir {
            debug!(dir = %dir.display(), "Found nested manifest");
            return Ok(dir.to_path_buf());
        }

        let module_dir = shallowest(files.iter().filter(|path| {
            file_name_is(path, |name| name == APP_DESCRIPTOR)
                && path.parent().is_some_and(|dir| dir != root)
        }))
        .and_then(|path| path.parent())
        .ok_or_else(|| ApplicationError::NoBrickDetected {
            root: root.to_path_buf(),
        })?;

        let (Some(module), Some(brick_dir)) = (
            module_dir.file_name().map(|n| n.to_string_lossy().into_owned()),
            module_dir.parent(),
        ) else {
            return Err(ApplicationError::NoBrickDetected {
                root: root.to_path_buf(),
            }
            .into());
        };

        let requirements = root.join(REQUIREMENTS_FILE);
        let dependencies = if fs.exists(&requirements) {
            requirements_head(
                &fs.read_to_string(&requirements)?,
                SYNTHESIZED_REQUIREMENTS_LIMIT,
            )
        } else {
            Vec::new()
        };
        let route = fs
            .exists(&module_dir.join(ROUTES_MODULE))
            .then(|| RouteSpec::new(format!("{module}/"), format!("{module}.urls")));

        info!(%module, deps = dependencies.len(), "Synthesizing manifest");
        let document = ManifestDocument::synthesized(module, dependencies, route);
        self.integration
            .reader()
            .write_synthesized(brick_dir, &document)?;
        Ok(brick_dir.to_path_buf())
    }

    /// Write the demo brick under the bricks directory unless it is there.
    fn materialize_demo(&self) -> BrickworkResult<PathBuf> {
        let demo_dir = self.bricks_dir.join(DEMO_BRICK_NAME);
        if self.integration.reader().locate(&demo_dir).is_some() {
            return Ok(demo_dir);
        }

        let fs = self.integration.filesystem();
        for (relative, content) in demo_brick::files() {
            let path = demo_dir.join(relative);
            if let Some(parent) = path.parent() {
                fs.create_dir_all(parent)?;
            }
            fs.write_file(&path, content)?;
        }
        info!(dir = %demo_dir.display(), "Demo brick materialized");
        Ok(demo_dir)
    }
}

fn file_name_is(path: &Path, predicate: impl Fn(&str) -> bool) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(predicate)
}

/// The path with the fewest components; ties go to the first seen.
fn shallowest<'a>(paths: impl Iterator<Item = &'a PathBuf>) -> Option<&'a Path> {
    paths
        .min_by_key(|path| path.components().count())
        .map(PathBuf::as_path)
}
