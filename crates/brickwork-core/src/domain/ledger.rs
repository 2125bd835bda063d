//! Ledger model: the persisted record of applied bricks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::action::Action;

/// Everything ever applied to a target project, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

/// Provenance of one brick application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub brick: String,
    /// Local brick path or normalized repository URL.
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub actions: Vec<Action>,
}

impl LedgerEntry {
    pub fn new(brick: impl Into<String>, source: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            brick: brick.into(),
            source: source.into(),
            timestamp: Utc::now(),
            actions,
        }
    }
}

impl Ledger {
    /// Append an entry. Entries are never removed or reordered.
    pub fn push(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry for a brick, if it was ever applied.
    pub fn latest(&self, brick: &str) -> Option<&LedgerEntry> {
        self.entries.iter().rev().find(|e| e.brick == brick)
    }

    pub fn to_json(&self, compact: bool) -> String {
        let rendered = if compact {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self)
        };
        rendered.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::ActionKind;

    #[test]
    fn empty_ledger_has_entries_key() {
        let json = Ledger::default().to_json(true);
        assert_eq!(json, r#"{"entries":[]}"#);
    }

    #[test]
    fn latest_finds_most_recent() {
        let mut ledger = Ledger::default();
        ledger.push(LedgerEntry::new("blog", "a", vec![]));
        ledger.push(LedgerEntry::new(
            "blog",
            "b",
            vec![Action::new("x", ActionKind::CreateDir)],
        ));
        assert_eq!(ledger.latest("blog").map(|e| e.source.as_str()), Some("b"));
        assert!(ledger.latest("shop").is_none());
    }

    #[test]
    fn entry_round_trips_through_json() {
        let mut ledger = Ledger::default();
        ledger.push(LedgerEntry::new(
            "x",
            "bricks/x",
            vec![Action::new("requirements.txt", ActionKind::AddRequirement("y".into()))],
        ));
        let parsed: Ledger = serde_json::from_str(&ledger.to_json(false)).unwrap();
        assert_eq!(parsed, ledger);
    }

    #[test]
    fn missing_entries_key_reads_as_empty() {
        let parsed: Ledger = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }
}
