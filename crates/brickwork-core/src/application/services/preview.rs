//! Dry-run diff preview.

use std::fmt::Write as _;

use serde::Serialize;

/// Lines one apply would add to one surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSection {
    pub file: String,
    pub label: String,
    pub additions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PreviewSection {
    pub fn new(file: impl Into<String>, label: impl Into<String>, additions: Vec<String>) -> Self {
        Self {
            file: file.into(),
            label: label.into(),
            additions,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Everything `apply` would add for one brick, grouped by surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffPreview {
    pub brick: String,
    pub sections: Vec<PreviewSection>,
}

impl DiffPreview {
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.additions.is_empty())
    }

    pub fn addition_count(&self) -> usize {
        self.sections.iter().map(|s| s.additions.len()).sum()
    }

    /// Unified-diff-like text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.is_empty() {
            let _ = writeln!(out, "No changes: {} is already integrated.", self.brick);
        }
        for section in &self.sections {
            let _ = writeln!(out, "--- {} ({})", section.file, section.label);
            for line in &section.additions {
                let _ = writeln!(out, "+ {line}");
            }
            if let Some(note) = &section.note {
                let _ = writeln!(out, "! {note}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_additions_per_file() {
        let preview = DiffPreview {
            brick: "blog".into(),
            sections: vec![
                PreviewSection::new("requirements.txt", "requirements", vec!["markdown".into()]),
                PreviewSection::new("config/urls.py", "routes", vec![
                    "    path(\"blog/\", include(\"blog.urls\")),".into(),
                ]),
            ],
        };
        let text = preview.render();
        assert!(text.starts_with("--- requirements.txt (requirements)\n+ markdown\n"));
        assert!(text.contains("+     path(\"blog/\", include(\"blog.urls\")),"));
        assert_eq!(preview.addition_count(), 2);
    }

    #[test]
    fn empty_preview_says_so() {
        let preview = DiffPreview {
            brick: "blog".into(),
            sections: Vec::new(),
        };
        assert!(preview.is_empty());
        assert_eq!(preview.render(), "No changes: blog is already integrated.\n");
    }

    #[test]
    fn notes_are_rendered() {
        let preview = DiffPreview {
            brick: "blog".into(),
            sections: vec![
                PreviewSection::new("config/settings.py", "MIDDLEWARE", Vec::new())
                    .with_note("MIDDLEWARE block not found"),
            ],
        };
        assert!(preview.is_empty());
        assert!(preview.render().contains("! MIDDLEWARE block not found"));
    }
}
