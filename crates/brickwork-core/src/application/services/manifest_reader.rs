//! Manifest discovery and loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, ManifestCodec};
use crate::domain::manifest::SYNTHESIZED_MANIFEST;
use crate::domain::{
    DomainError, MANIFEST_CANDIDATES, Manifest, ManifestDocument, ManifestFormat,
};
use crate::error::BrickworkResult;

/// Name used when neither the document nor the directory provides one.
const UNNAMED_BRICK: &str = "brick";

/// Finds and decodes brick manifests through the filesystem port.
#[derive(Clone)]
pub struct ManifestReader {
    fs: Arc<dyn Filesystem>,
    codec: Arc<dyn ManifestCodec>,
}

impl ManifestReader {
    pub fn new(fs: Arc<dyn Filesystem>, codec: Arc<dyn ManifestCodec>) -> Self {
        Self { fs, codec }
    }

    /// First manifest candidate present in `dir`, in probe order.
    pub fn locate(&self, dir: &Path) -> Option<(PathBuf, ManifestFormat)> {
        MANIFEST_CANDIDATES
            .iter()
            .map(|(file, format)| (dir.join(file), *format))
            .find(|(path, _)| self.fs.exists(path) && !self.fs.is_dir(path))
    }

    /// Load and normalize the manifest of the brick at `dir`.
    ///
    /// # Errors
    ///
    /// - `DomainError::ManifestNotFound` when no candidate file exists
    /// - `DomainError::ManifestInvalid` when the file does not decode to an object
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn read(&self, dir: &Path) -> BrickworkResult<Manifest> {
        let (path, format) = self
            .locate(dir)
            .ok_or_else(|| DomainError::ManifestNotFound {
                dir: dir.to_path_buf(),
            })?;
        debug!(path = %path.display(), %format, "Reading manifest");

        let text = self.fs.read_to_string(&path)?;
        let document =
            self.codec
                .decode(format, &text)
                .map_err(|reason| DomainError::ManifestInvalid {
                    path: path.clone(),
                    reason,
                })?;

        let resolved = self.fs.canonicalize(dir)?;
        Ok(Manifest::from_document(document, &fallback_name(&resolved)))
    }

    /// Persist a synthesized document as `brick.yaml` in `dir`.
    pub fn write_synthesized(
        &self,
        dir: &Path,
        document: &ManifestDocument,
    ) -> BrickworkResult<PathBuf> {
        let text = self
            .codec
            .encode(ManifestFormat::Yaml, document)
            .map_err(|reason| ApplicationError::ManifestEncodeFailed { reason })?;
        let path = dir.join(SYNTHESIZED_MANIFEST);
        self.fs.write_file(&path, &text)?;
        debug!(path = %path.display(), "Wrote synthesized manifest");
        Ok(path)
    }
}

fn fallback_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNNAMED_BRICK.to_string())
}
