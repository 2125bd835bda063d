//! Requirements file mutator.
//!
//! A package counts as present when any existing line starts with its name,
//! so `foo==1.0` satisfies a plain `foo`. Version pins are not compared.

use std::collections::HashSet;

use crate::domain::{action::ActionKind, text::TextDocument};

/// Packages that would be appended, in plan order, without duplicates.
pub fn pending<'a>(doc: &TextDocument, packages: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    packages
        .into_iter()
        .filter(|name| !name.is_empty())
        .filter(|name| !doc.any_line_starts_with(name))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Append every missing package as its own line.
pub fn apply<'a>(
    doc: &mut TextDocument,
    packages: impl IntoIterator<Item = &'a str>,
) -> Vec<ActionKind> {
    pending(doc, packages)
        .into_iter()
        .map(|name| {
            doc.append_line(&name);
            ActionKind::AddRequirement(name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_package_satisfies_bare_name() {
        let mut doc = TextDocument::new("foo==1.0\n");
        let actions = apply(&mut doc, ["foo"]);
        assert!(actions.is_empty());
        assert!(!doc.is_changed());
    }

    #[test]
    fn missing_packages_are_appended_in_order() {
        let mut doc = TextDocument::new("Django>=5\n");
        let actions = apply(&mut doc, ["requests", "rich"]);
        assert_eq!(
            actions,
            vec![
                ActionKind::AddRequirement("requests".into()),
                ActionKind::AddRequirement("rich".into())
            ]
        );
        assert_eq!(doc.as_str(), "Django>=5\nrequests\nrich\n");
    }

    #[test]
    fn duplicates_in_plan_are_added_once() {
        let mut doc = TextDocument::default();
        let actions = apply(&mut doc, ["y", "y"]);
        assert_eq!(actions.len(), 1);
        assert_eq!(doc.as_str(), "y\n");
    }

    #[test]
    fn second_apply_is_a_no_op() {
        let mut doc = TextDocument::default();
        apply(&mut doc, ["a", "b"]);
        assert!(apply(&mut doc, ["a", "b"]).is_empty());
    }

    #[test]
    fn pending_does_not_edit() {
        let doc = TextDocument::new("a\n");
        assert_eq!(pending(&doc, ["a", "b"]), vec!["b"]);
        assert!(!doc.is_changed());
    }
}
