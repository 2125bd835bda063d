//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`TargetProject`] and
//! [`Hooks`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `BRICKWORK__<SECTION>__<KEY>`
//! 3. The file given with `--config`
//! 4. `<project>/brickwork.toml`
//! 5. The user config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use brickwork_core::{application::Hooks, domain::TargetProject};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Per-project configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "brickwork.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Target project layout.
    pub project: ProjectConfig,
    /// External commands run after mutation.
    pub hooks: HooksConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub requirements: PathBuf,
    pub settings: PathBuf,
    pub routes: PathBuf,
    pub env_template: PathBuf,
    pub ledger: PathBuf,
    /// Where the demo brick is materialized by `install`.
    pub bricks_dir: PathBuf,
    pub installed_block: String,
    pub middleware_block: String,
    pub route_anchor: String,
}

/// `None` means the built-in default command; an empty list disables the hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let target = TargetProject::new(".");
        Self {
            requirements: target.requirements,
            settings: target.settings,
            routes: target.routes,
            env_template: target.env_template,
            ledger: target.ledger,
            bricks_dir: PathBuf::from("bricks"),
            installed_block: target.installed_block,
            middleware_block: target.middleware_block,
            route_anchor: target.route_anchor,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            hooks: HooksConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration layered over the built-in defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// implicit files it must exist.
    pub fn load(config_file: Option<&Path>, project_root: &Path) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(user) = Self::config_path() {
            builder = builder.add_source(File::from(user).required(false));
        }
        builder = builder
            .add_source(File::from(project_root.join(PROJECT_CONFIG_FILE)).required(false));
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("BRICKWORK")
                .separator("__")
                .list_separator(" ")
                .with_list_parse_key("hooks.install")
                .with_list_parse_key("hooks.migrate")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// The configuration `init` writes: defaults with the hooks spelled out.
    pub fn template() -> Self {
        let hooks = Hooks::default();
        Self {
            hooks: HooksConfig {
                install: Some(hooks.install),
                migrate: Some(hooks.migrate),
            },
            ..Self::default()
        }
    }

    /// Path to the user configuration file, if a home directory is known.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "brickwork", "brickwork")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The target project rooted at `root`.
    pub fn target(&self, root: &Path) -> TargetProject {
        let p = &self.project;
        let mut target = TargetProject::new(root);
        target.requirements = p.requirements.clone();
        target.settings = p.settings.clone();
        target.routes = p.routes.clone();
        target.env_template = p.env_template.clone();
        target.ledger = p.ledger.clone();
        target.installed_block = p.installed_block.clone();
        target.middleware_block = p.middleware_block.clone();
        target.route_anchor = p.route_anchor.clone();
        target
    }

    pub fn hooks(&self) -> Hooks {
        let defaults = Hooks::default();
        Hooks {
            install: self.hooks.install.clone().unwrap_or(defaults.install),
            migrate: self.hooks.migrate.clone().unwrap_or(defaults.migrate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_conventional_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.project.settings, PathBuf::from("config/settings.py"));
        assert_eq!(cfg.project.bricks_dir, PathBuf::from("bricks"));
        assert_eq!(cfg.hooks(), Hooks::default());
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[project]\nsettings = \"site/settings.py\"\n\n[hooks]\ninstall = []\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.project.settings, PathBuf::from("site/settings.py"));
        assert_eq!(cfg.project.routes, PathBuf::from("config/urls.py"));

        let hooks = cfg.hooks();
        assert!(hooks.install.is_empty());
        assert_eq!(hooks.migrate, Hooks::default().migrate);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn target_carries_configured_paths() {
        let mut cfg = AppConfig::default();
        cfg.project.route_anchor = "# routes".into();
        let target = cfg.target(Path::new("/srv/site"));
        assert_eq!(target.root(), Path::new("/srv/site"));
        assert_eq!(target.route_anchor, "# routes");
        assert_eq!(target.settings_path(), PathBuf::from("/srv/site/config/settings.py"));
    }

    #[test]
    fn template_spells_out_hooks() {
        let text = toml::to_string_pretty(&AppConfig::template()).unwrap();
        assert!(text.contains("[hooks]"));
        assert!(text.contains("manage.py"));
    }
}
