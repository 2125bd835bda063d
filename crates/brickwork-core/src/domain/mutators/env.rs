//! Environment template mutator.

use std::collections::HashSet;

use crate::domain::{action::ActionKind, manifest::EnvKey, text::TextDocument};

/// `KEY=default` lines that would be appended.
pub fn pending<'a>(doc: &TextDocument, keys: impl IntoIterator<Item = &'a EnvKey>) -> Vec<&'a EnvKey> {
    let existing: HashSet<&str> = doc.assignment_keys().collect();
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|k| !k.key.is_empty())
        .filter(|k| !existing.contains(k.key.as_str()))
        .filter(|k| seen.insert(k.key.as_str()))
        .collect()
}

pub fn line(key: &EnvKey) -> String {
    format!("{}={}", key.key, key.default)
}

/// Append each undefined key with its default.
pub fn apply(doc: &mut TextDocument, keys: &[EnvKey]) -> Vec<ActionKind> {
    let missing: Vec<EnvKey> = pending(doc, keys).into_iter().cloned().collect();
    missing
        .into_iter()
        .map(|key| {
            doc.append_line(&line(&key));
            ActionKind::EnvKey(key.key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_keys_are_not_repeated() {
        let mut doc = TextDocument::new("SECRET_KEY=abc\n# DEBUG=1\n");
        let actions = apply(
            &mut doc,
            &[EnvKey::new("SECRET_KEY", "x"), EnvKey::new("DEBUG", "true")],
        );
        assert_eq!(actions, vec![ActionKind::EnvKey("DEBUG".into())]);
        assert_eq!(doc.as_str(), "SECRET_KEY=abc\n# DEBUG=1\nDEBUG=true\n");
    }

    #[test]
    fn empty_default_writes_bare_assignment() {
        let mut doc = TextDocument::default();
        apply(&mut doc, &[EnvKey::new("TOKEN", "")]);
        assert_eq!(doc.as_str(), "TOKEN=\n");
    }

    #[test]
    fn second_apply_adds_nothing() {
        let mut doc = TextDocument::default();
        let keys = [EnvKey::new("A", "1"), EnvKey::new("A", "2")];
        assert_eq!(apply(&mut doc, &keys).len(), 1);
        assert!(apply(&mut doc, &keys).is_empty());
    }
}
