//! Named list-block mutator for the settings-like file.
//!
//! Finds `"<BLOCK> = ["` and its closing bracket, then inserts each entry as
//! `    "<entry>",` just before the bracket. An entry already present anywhere
//! in the file, in exactly that form, is skipped.

use std::collections::HashSet;

use crate::domain::{action::ActionKind, text::TextDocument};

/// The serialized form an entry takes inside a block.
pub fn entry_line(entry: &str) -> String {
    format!("    \"{entry}\",")
}

/// Result of applying one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockOutcome {
    pub actions: Vec<ActionKind>,
    /// Entries that could not be placed because the block anchor is missing.
    pub skipped: Vec<String>,
}

/// Entries that would be inserted, or `None` when the block cannot be found.
pub fn pending<'a>(
    doc: &TextDocument,
    block: &str,
    entries: impl IntoIterator<Item = &'a String>,
) -> Option<Vec<String>> {
    doc.list_block(block)?;
    let mut seen = HashSet::new();
    Some(
        entries
            .into_iter()
            .filter(|entry| !doc.contains(&entry_line(entry)))
            .filter(|entry| seen.insert(entry.as_str()))
            .cloned()
            .collect(),
    )
}

/// Insert the missing entries into `block`.
///
/// A missing block is not an error: nothing is written and the entries are
/// returned in [`BlockOutcome::skipped`] so the caller can warn.
pub fn apply(doc: &mut TextDocument, block: &str, entries: &[String]) -> BlockOutcome {
    if entries.is_empty() {
        return BlockOutcome::default();
    }

    let (Some(span), Some(missing)) = (doc.list_block(block), pending(doc, block, entries)) else {
        return BlockOutcome {
            actions: Vec::new(),
            skipped: entries.to_vec(),
        };
    };

    if missing.is_empty() {
        return BlockOutcome::default();
    }

    let lines: Vec<String> = missing.iter().map(|e| entry_line(e)).collect();
    doc.insert_lines_before_close(span, &lines);

    BlockOutcome {
        actions: missing
            .into_iter()
            .map(|entry| ActionKind::AddBlockEntry {
                block: block.to_string(),
                entry,
            })
            .collect(),
        skipped: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = "INSTALLED_APPS = [\n    \"django.contrib.admin\",\n]\n\nMIDDLEWARE = [\n    \"django.middleware.security.SecurityMiddleware\",\n]\n";

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn inserts_before_closing_bracket() {
        let mut doc = TextDocument::new(SETTINGS);
        let out = apply(&mut doc, "INSTALLED_APPS", &s(&["blog"]));
        assert_eq!(
            out.actions,
            vec![ActionKind::AddBlockEntry {
                block: "INSTALLED_APPS".into(),
                entry: "blog".into()
            }]
        );
        assert!(doc.as_str().starts_with(
            "INSTALLED_APPS = [\n    \"django.contrib.admin\",\n    \"blog\",\n]\n"
        ));
    }

    #[test]
    fn middleware_block_is_independent() {
        let mut doc = TextDocument::new(SETTINGS);
        apply(&mut doc, "MIDDLEWARE", &s(&["blog.middleware.Noop"]));
        let mw = doc.as_str().split("MIDDLEWARE").nth(1).unwrap();
        assert!(mw.contains("    \"blog.middleware.Noop\",\n]"));
    }

    #[test]
    fn present_entries_are_skipped() {
        let mut doc = TextDocument::new(SETTINGS);
        let out = apply(&mut doc, "INSTALLED_APPS", &s(&["django.contrib.admin"]));
        assert!(out.actions.is_empty());
        assert!(!doc.is_changed());
    }

    #[test]
    fn differently_quoted_entry_is_not_recognized() {
        let mut doc = TextDocument::new("INSTALLED_APPS = [\n    'blog',\n]\n");
        let out = apply(&mut doc, "INSTALLED_APPS", &s(&["blog"]));
        assert_eq!(out.actions.len(), 1);
    }

    #[test]
    fn missing_block_reports_skipped_entries() {
        let mut doc = TextDocument::new("DEBUG = True\n");
        let out = apply(&mut doc, "INSTALLED_APPS", &s(&["blog", "shop"]));
        assert!(out.actions.is_empty());
        assert_eq!(out.skipped, s(&["blog", "shop"]));
        assert!(!doc.is_changed());
        assert!(pending(&doc, "INSTALLED_APPS", &s(&["blog"])).is_none());
    }

    #[test]
    fn empty_entry_list_never_warns() {
        let mut doc = TextDocument::new("");
        assert_eq!(apply(&mut doc, "INSTALLED_APPS", &[]), BlockOutcome::default());
    }

    #[test]
    fn repeated_apply_is_idempotent() {
        let mut doc = TextDocument::new(SETTINGS);
        apply(&mut doc, "INSTALLED_APPS", &s(&["blog", "shop"]));
        let again = apply(&mut doc, "INSTALLED_APPS", &s(&["blog", "shop"]));
        assert!(again.actions.is_empty());
    }
}
