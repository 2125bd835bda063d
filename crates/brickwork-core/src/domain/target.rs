//! Target project configuration.
//!
//! Every component receives a [`TargetProject`] explicitly; there are no
//! process-wide path constants.

use std::path::{Component, Path, PathBuf};

/// Default anchor comment in the routing file. Route lines are inserted
/// immediately before it.
pub const DEFAULT_ROUTE_ANCHOR: &str = "# bricks: generated routes end here";

/// Named file surfaces of the project a brick is applied to.
///
/// All surface paths are relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProject {
    root: PathBuf,
    pub requirements: PathBuf,
    pub settings: PathBuf,
    pub routes: PathBuf,
    pub env_template: PathBuf,
    pub ledger: PathBuf,
    pub installed_block: String,
    pub middleware_block: String,
    pub route_anchor: String,
}

impl TargetProject {
    /// Conventional layout: `requirements.txt`, `config/settings.py`,
    /// `config/urls.py`, `.env.example`, ledger in `tools/brick_ledger.json`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            requirements: PathBuf::from("requirements.txt"),
            settings: PathBuf::from("config").join("settings.py"),
            routes: PathBuf::from("config").join("urls.py"),
            env_template: PathBuf::from(".env.example"),
            ledger: PathBuf::from("tools").join("brick_ledger.json"),
            installed_block: "INSTALLED_APPS".to_string(),
            middleware_block: "MIDDLEWARE".to_string(),
            route_anchor: DEFAULT_ROUTE_ANCHOR.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (root-joined) path of a project-relative surface.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn requirements_path(&self) -> PathBuf {
        self.resolve(&self.requirements)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.resolve(&self.settings)
    }

    pub fn routes_path(&self) -> PathBuf {
        self.resolve(&self.routes)
    }

    pub fn env_template_path(&self) -> PathBuf {
        self.resolve(&self.env_template)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.resolve(&self.ledger)
    }

    /// Label used for `Action::file`: the relative path with `/` separators.
    pub fn label(relative: &Path) -> String {
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_paths_resolve_under_root() {
        let target = TargetProject::new("/srv/site");
        assert_eq!(
            target.settings_path(),
            PathBuf::from("/srv/site/config/settings.py")
        );
        assert_eq!(
            target.ledger_path(),
            PathBuf::from("/srv/site/tools/brick_ledger.json")
        );
    }

    #[test]
    fn label_uses_forward_slashes() {
        let rel = PathBuf::from("config").join("urls.py");
        assert_eq!(TargetProject::label(&rel), "config/urls.py");
        assert_eq!(TargetProject::label(Path::new("./.env.example")), ".env.example");
    }
}
