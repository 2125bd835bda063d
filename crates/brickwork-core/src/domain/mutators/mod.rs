//! Textual mutators.
//!
//! Each mutator is a pair of pure functions over a [`TextDocument`]:
//!
//! - `pending` answers "which lines would be added?" without editing. The
//!   diff previewer calls only this.
//! - `apply` performs the insertions and returns one [`ActionKind`] per line
//!   actually written. Lines already present contribute nothing, which makes
//!   a second apply a no-op.
//!
//! File I/O and the module copier live in the application layer; the
//! functions here never touch the filesystem.
//!
//! [`TextDocument`]: crate::domain::text::TextDocument
//! [`ActionKind`]: crate::domain::action::ActionKind

pub mod config_block;
pub mod env;
pub mod requirements;
pub mod routes;

use std::fmt;

use serde::Serialize;

/// Non-fatal conditions found while applying a brick.
///
/// These never abort an apply; they are logged and shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrationWarning {
    /// The named list-block (or the whole settings file) was not found, so
    /// its entries were skipped.
    BlockAnchorMissing {
        file: String,
        block: String,
        skipped: Vec<String>,
    },
    /// The routing anchor comment was missing; routes were placed before the
    /// last closing bracket or at end of file instead.
    RouteAnchorMissing { file: String, anchor: String },
    /// The manifest carried settings overrides, which are recorded in the plan
    /// but never written.
    SettingsOverridesIgnored { keys: Vec<String> },
    /// A hook failed while applying the demo brick; the apply went on.
    HookFailed { command: String, reason: String },
}

impl fmt::Display for IntegrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockAnchorMissing {
                file,
                block,
                skipped,
            } => write!(
                f,
                "{block} block not found in {file}; skipped {}",
                skipped.join(", ")
            ),
            Self::RouteAnchorMissing { file, anchor } => write!(
                f,
                "anchor '{anchor}' not found in {file}; routes appended before the last ']' or at end of file"
            ),
            Self::SettingsOverridesIgnored { keys } => write!(
                f,
                "settings overrides are recorded but not applied: {}",
                keys.join(", ")
            ),
            Self::HookFailed { command, reason } => {
                write!(f, "hook '{command}' failed ({reason}); continuing")
            }
        }
    }
}
