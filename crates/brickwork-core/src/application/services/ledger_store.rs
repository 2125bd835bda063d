//! Persistent provenance ledger.
//!
//! The ledger is a single JSON document. Every update is a full
//! load-mutate-save cycle under one lock, so concurrent appends from the
//! same process never lose entries.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::ports::Filesystem;
use crate::domain::{Ledger, LedgerEntry};
use crate::error::BrickworkResult;

pub struct LedgerHandle {
    fs: Arc<dyn Filesystem>,
    path: PathBuf,
    gate: Mutex<()>,
}

impl LedgerHandle {
    pub fn new(fs: Arc<dyn Filesystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
            gate: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current ledger contents. A missing file is an empty ledger.
    pub fn load(&self) -> BrickworkResult<Ledger> {
        let _guard = self
            .gate
            .lock()
            .map_err(|_| ApplicationError::LedgerLockPoisoned)?;
        self.read()
    }

    /// Append one entry and persist the whole ledger.
    #[instrument(skip(self, entry), fields(brick = %entry.brick))]
    pub fn append(&self, entry: LedgerEntry) -> BrickworkResult<()> {
        self.update(|ledger| ledger.push(entry))
    }

    /// Run `mutate` against the current ledger and save the result.
    pub fn update<F>(&self, mutate: F) -> BrickworkResult<()>
    where
        F: FnOnce(&mut Ledger),
    {
        let _guard = self
            .gate
            .lock()
            .map_err(|_| ApplicationError::LedgerLockPoisoned)?;

        let mut ledger = self.read()?;
        mutate(&mut ledger);
        self.write(&ledger)?;

        debug!(entries = ledger.len(), path = %self.path.display(), "Ledger saved");
        Ok(())
    }

    fn read(&self) -> BrickworkResult<Ledger> {
        if !self.fs.exists(&self.path) {
            return Ok(Ledger::default());
        }
        let text = self.fs.read_to_string(&self.path)?;
        let ledger = serde_json::from_str(&text).map_err(|e| ApplicationError::LedgerCorrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(ledger)
    }

    fn write(&self, ledger: &Ledger) -> BrickworkResult<()> {
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let mut text = ledger.to_json(false);
        text.push('\n');
        self.fs.write_file(&self.path, &text)
    }
}
