//! Integration service - plan, preview and apply a local brick.
//!
//! Orchestrates the manifest reader, the pure mutators, the module copier,
//! the external hooks and the ledger. Nothing here parses YAML or spawns a
//! process directly; those go through the ports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{
    CommandRunner, ExternalCommand, Filesystem, ManifestCodec,
};
use crate::application::services::ledger_store::LedgerHandle;
use crate::application::services::manifest_reader::ManifestReader;
use crate::application::services::preview::{DiffPreview, PreviewSection};
use crate::domain::mutators::{config_block, env, requirements, routes};
use crate::domain::{
    Action, ActionKind, IntegrationWarning, LedgerEntry, Manifest, Plan, TargetProject,
    TextDocument, compile,
};
use crate::error::BrickworkResult;

/// External commands run after the textual mutations.
///
/// Each hook is an argv; `{root}` and `{requirements}` are substituted. An
/// empty argv disables the hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hooks {
    pub install: Vec<String>,
    pub migrate: Vec<String>,
}

impl Hooks {
    /// Both hooks disabled.
    pub fn disabled() -> Self {
        Self {
            install: Vec::new(),
            migrate: Vec::new(),
        }
    }
}

impl Default for Hooks {
    fn default() -> Self {
        let argv = |parts: &[&str]| -> Vec<String> { parts.iter().map(|p| p.to_string()).collect() };
        Self {
            install: argv(&[
                "pip",
                "install",
                "-r",
                "{requirements}",
                "--disable-pip-version-check",
                "--no-input",
            ]),
            migrate: argv(&["python", "manage.py", "migrate", "--noinput"]),
        }
    }
}

/// A brick whose manifest has been loaded and compiled.
#[derive(Debug, Clone)]
pub struct PreparedBrick {
    pub dir: PathBuf,
    pub manifest: Manifest,
    pub plan: Plan,
}

/// Result of a successful apply.
#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// The entry appended to the ledger.
    pub entry: LedgerEntry,
    pub warnings: Vec<IntegrationWarning>,
    /// Display form of every hook that ran.
    pub hooks_run: Vec<String>,
}

impl ApplyReport {
    pub fn is_noop(&self) -> bool {
        self.entry.actions.is_empty()
    }
}

/// Applies bricks to one target project.
pub struct IntegrationService {
    fs: Arc<dyn Filesystem>,
    reader: ManifestReader,
    ledger: LedgerHandle,
    runner: Arc<dyn CommandRunner>,
    target: TargetProject,
    hooks: Hooks,
}

impl IntegrationService {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        codec: Arc<dyn ManifestCodec>,
        runner: Arc<dyn CommandRunner>,
        target: TargetProject,
        hooks: Hooks,
    ) -> Self {
        let reader = ManifestReader::new(Arc::clone(&fs), codec);
        let ledger = LedgerHandle::new(Arc::clone(&fs), target.ledger_path());
        Self {
            fs,
            reader,
            ledger,
            runner,
            target,
            hooks,
        }
    }

    pub fn target(&self) -> &TargetProject {
        &self.target
    }

    pub fn reader(&self) -> &ManifestReader {
        &self.reader
    }

    pub fn ledger(&self) -> &LedgerHandle {
        &self.ledger
    }

    pub(crate) fn filesystem(&self) -> &Arc<dyn Filesystem> {
        &self.fs
    }

    /// Load the manifest at `brick_dir` and compile its plan.
    #[instrument(skip(self), fields(brick_dir = %brick_dir.display()))]
    pub fn prepare(&self, brick_dir: &Path) -> BrickworkResult<PreparedBrick> {
        let manifest = self.reader.read(brick_dir)?;
        let plan = compile(&manifest);
        debug!(
            brick = %manifest.name,
            requirements = plan.requirements.len(),
            routes = plan.urls.len(),
            "Plan compiled"
        );
        Ok(PreparedBrick {
            dir: brick_dir.to_path_buf(),
            manifest,
            plan,
        })
    }

    /// Apply a prepared brick and record it in the ledger.
    ///
    /// Order of effects: requirements, module copies, the two settings
    /// blocks, routes, environment template, installer hook, migrator hook,
    /// ledger entry. A ledger entry is written even when no action was taken.
    ///
    /// # Errors
    ///
    /// Filesystem failures and hook failures abort the apply. Files already
    /// edited stay edited; no ledger entry is written in that case.
    pub fn apply(&self, brick: &PreparedBrick, source: &str) -> BrickworkResult<ApplyReport> {
        self.apply_with(brick, source, HookFailure::Abort)
    }

    /// Like [`Self::apply`], but hook failures become warnings and the
    /// ledger entry is still written. Used for the install fallback.
    pub(crate) fn apply_tolerating_hooks(
        &self,
        brick: &PreparedBrick,
        source: &str,
    ) -> BrickworkResult<ApplyReport> {
        self.apply_with(brick, source, HookFailure::Warn)
    }

    #[instrument(skip(self, brick), fields(brick = %brick.manifest.name))]
    fn apply_with(
        &self,
        brick: &PreparedBrick,
        source: &str,
        on_hook_failure: HookFailure,
    ) -> BrickworkResult<ApplyReport> {
        let plan = &brick.plan;
        let mut actions = Vec::new();
        let mut warnings = Vec::new();

        // 1. Requirements
        let file = TargetProject::label(&self.target.requirements);
        let kinds = self.edit_file(&self.target.requirements_path(), |doc| {
            requirements::apply(doc, plan.package_names())
        })?;
        actions.extend(tag(&file, kinds));

        // 2. Module directories
        actions.extend(self.copy_modules(brick)?);

        // 3. Settings blocks
        let file = TargetProject::label(&self.target.settings);
        let outcomes = self.edit_file(&self.target.settings_path(), |doc| {
            [
                (&self.target.installed_block, &plan.settings.installed_apps),
                (&self.target.middleware_block, &plan.settings.middleware),
            ]
            .map(|(block, entries)| (block, config_block::apply(doc, block, entries)))
        })?;
        for (block, outcome) in outcomes {
            actions.extend(tag(&file, outcome.actions));
            if !outcome.skipped.is_empty() {
                warnings.push(IntegrationWarning::BlockAnchorMissing {
                    file: file.clone(),
                    block: block.clone(),
                    skipped: outcome.skipped,
                });
            }
        }

        // 4. Routes
        let file = TargetProject::label(&self.target.routes);
        let outcome = self.edit_file(&self.target.routes_path(), |doc| {
            routes::apply(doc, &plan.urls, &self.target.route_anchor)
        })?;
        actions.extend(tag(&file, outcome.actions));
        if outcome.anchor_missing {
            warnings.push(IntegrationWarning::RouteAnchorMissing {
                file,
                anchor: self.target.route_anchor.clone(),
            });
        }

        // 5. Environment template
        let file = TargetProject::label(&self.target.env_template);
        let kinds = self.edit_file(&self.target.env_template_path(), |doc| {
            env::apply(doc, &plan.env)
        })?;
        actions.extend(tag(&file, kinds));

        if let Some(block) = plan.settings.blocks.first() {
            warnings.push(IntegrationWarning::SettingsOverridesIgnored {
                keys: block.value.keys().cloned().collect(),
            });
        }
        for warning in &warnings {
            warn!(%warning, "Integration warning");
        }

        // 6. Hooks
        let mut hooks_run = Vec::new();
        let hooks: [(&[String], fn(String, String) -> ApplicationError); 2] = [
            (self.hooks.install.as_slice(), |command, reason| {
                ApplicationError::DependencyInstallFailed { command, reason }
            }),
            (self.hooks.migrate.as_slice(), |command, reason| {
                ApplicationError::MigrationFailed { command, reason }
            }),
        ];
        for (argv, failed) in hooks {
            match self.run_hook(argv) {
                Ok(Some(cmd)) => hooks_run.push(cmd),
                Ok(None) => {}
                Err((command, reason)) => match on_hook_failure {
                    HookFailure::Abort => return Err(failed(command, reason).into()),
                    HookFailure::Warn => {
                        let warning = IntegrationWarning::HookFailed { command, reason };
                        warn!(%warning, "Integration warning");
                        warnings.push(warning);
                    }
                },
            }
        }

        // 7. Ledger
        let entry = LedgerEntry::new(&brick.manifest.name, source, actions);
        self.ledger.append(entry.clone())?;

        info!(
            brick = %entry.brick,
            actions = entry.actions.len(),
            warnings = warnings.len(),
            "Brick applied"
        );

        Ok(ApplyReport {
            entry,
            warnings,
            hooks_run,
        })
    }

    /// Compute what `apply` would add, without touching any file.
    #[instrument(skip(self, brick), fields(brick = %brick.manifest.name))]
    pub fn preview(&self, brick: &PreparedBrick) -> BrickworkResult<DiffPreview> {
        let plan = &brick.plan;
        let mut sections = Vec::new();

        let doc = self.open(&self.target.requirements_path())?;
        sections.push(PreviewSection::new(
            TargetProject::label(&self.target.requirements),
            "requirements",
            requirements::pending(&doc, plan.package_names()),
        ));

        let copies = self
            .pending_copies(brick)
            .into_iter()
            .map(|module| format!("{module}/"))
            .collect();
        sections.push(PreviewSection::new("(project root)", "module copies", copies));

        let settings = TargetProject::label(&self.target.settings);
        let doc = self.open(&self.target.settings_path())?;
        for (block, entries) in [
            (&self.target.installed_block, &plan.settings.installed_apps),
            (&self.target.middleware_block, &plan.settings.middleware),
        ] {
            let section = match config_block::pending(&doc, block, entries) {
                Some(missing) => PreviewSection::new(
                    settings.clone(),
                    block.clone(),
                    missing.iter().map(|e| config_block::entry_line(e)).collect(),
                ),
                None if !entries.is_empty() => {
                    PreviewSection::new(settings.clone(), block.clone(), Vec::new()).with_note(
                        format!("{block} block not found; {} entries would be skipped", entries.len()),
                    )
                }
                None => continue,
            };
            sections.push(section);
        }

        let doc = self.open(&self.target.routes_path())?;
        let lines = routes::pending(&doc, &plan.urls);
        let mut section =
            PreviewSection::new(TargetProject::label(&self.target.routes), "routes", lines);
        if !section.additions.is_empty() && doc.line_start_of(&self.target.route_anchor).is_none() {
            section = section.with_note(format!(
                "anchor '{}' not found; routes go before the last closing bracket",
                self.target.route_anchor
            ));
        }
        sections.push(section);

        let doc = self.open(&self.target.env_template_path())?;
        sections.push(PreviewSection::new(
            TargetProject::label(&self.target.env_template),
            "environment",
            env::pending(&doc, &plan.env).into_iter().map(env::line).collect(),
        ));

        sections.retain(|s| !s.additions.is_empty() || s.note.is_some());
        Ok(DiffPreview {
            brick: brick.manifest.name.clone(),
            sections,
        })
    }

    /// Modules present in the brick but not yet in the project.
    fn pending_copies<'a>(&self, brick: &'a PreparedBrick) -> Vec<&'a str> {
        brick
            .plan
            .files
            .iter()
            .map(|copy| copy.module.as_str())
            .filter(|module| {
                self.fs.is_dir(&brick.dir.join(module))
                    && !self.fs.exists(&self.target.resolve(module))
            })
            .collect()
    }

    fn copy_modules(&self, brick: &PreparedBrick) -> BrickworkResult<Vec<Action>> {
        let mut actions = Vec::new();
        for module in self.pending_copies(brick) {
            let from = brick.dir.join(module);
            let to = self.target.resolve(module);
            debug!(from = %from.display(), to = %to.display(), "Copying module");
            self.fs.copy_dir_all(&from, &to)?;
            actions.push(Action::new(module, ActionKind::CreateDir));
        }
        Ok(actions)
    }

    /// Read a project file, treating a missing file as empty.
    fn open(&self, path: &Path) -> BrickworkResult<TextDocument> {
        if self.fs.exists(path) {
            Ok(TextDocument::new(self.fs.read_to_string(path)?))
        } else {
            Ok(TextDocument::new(String::new()))
        }
    }

    /// Load, edit, and write back only if the edit changed something.
    fn edit_file<T>(
        &self,
        path: &Path,
        edit: impl FnOnce(&mut TextDocument) -> T,
    ) -> BrickworkResult<T> {
        let mut doc = self.open(path)?;
        let out = edit(&mut doc);
        if doc.is_changed() {
            if let Some(parent) = path.parent() {
                self.fs.create_dir_all(parent)?;
            }
            self.fs.write_file(path, doc.as_str())?;
            debug!(path = %path.display(), "File updated");
        }
        Ok(out)
    }

    /// Run one hook. `Ok(None)` when disabled; on failure the error carries
    /// the rendered command and the reason.
    fn run_hook(&self, argv: &[String]) -> Result<Option<String>, (String, String)> {
        let Some(command) = ExternalCommand::from_template(argv, &self.target) else {
            return Ok(None);
        };
        let rendered = command.to_string();
        info!(command = %rendered, "Running hook");

        let status = self
            .runner
            .run(&command)
            .map_err(|e| (rendered.clone(), e.to_string()))?;
        if !status.success {
            let reason = match status.code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err((rendered, reason));
        }
        Ok(Some(rendered))
    }
}

#[derive(Debug, Clone, Copy)]
enum HookFailure {
    Abort,
    Warn,
}

fn tag(file: &str, kinds: Vec<ActionKind>) -> impl Iterator<Item = Action> + '_ {
    kinds.into_iter().map(move |kind| Action::new(file, kind))
}
