//! Line-oriented text editing for target project files.
//!
//! Mutators never search or splice strings themselves; they ask a
//! [`TextDocument`] whether a serialized form is present and where to insert.
//! Membership is textual and format-sensitive: `"blog",` and `'blog',` are
//! different entries.

/// Half-open byte range of a named list-block, `start` at the block anchor,
/// `close` at its closing bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub close: usize,
}

/// An in-memory text file being inspected or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    content: String,
    changed: bool,
}

impl TextDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            changed: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    /// `true` once any edit has been made.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Exact substring membership.
    pub fn contains(&self, needle: &str) -> bool {
        self.content.contains(needle)
    }

    /// Whether any line, once trimmed, starts with `prefix`.
    pub fn any_line_starts_with(&self, prefix: &str) -> bool {
        self.content
            .lines()
            .any(|line| line.trim().starts_with(prefix))
    }

    /// Keys defined by `KEY=value` lines, skipping blanks and `#` comments.
    pub fn assignment_keys(&self) -> impl Iterator<Item = &str> {
        self.content.lines().filter_map(|line| {
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            line.split_once('=').map(|(key, _)| key)
        })
    }

    /// Locate `"<name> = ["` and the first `]` after it.
    pub fn list_block(&self, name: &str) -> Option<BlockSpan> {
        let anchor = format!("{name} = [");
        let start = self.content.find(&anchor)?;
        let close = start + self.content[start..].find(']')?;
        Some(BlockSpan { start, close })
    }

    /// Byte offset of the start of the first line containing `needle`.
    pub fn line_start_of(&self, needle: &str) -> Option<usize> {
        let idx = self.content.find(needle)?;
        Some(self.line_start(idx))
    }

    /// Byte offset of the last line that is exactly a closing `]`
    /// (surrounding whitespace allowed).
    pub fn last_closing_bracket_line(&self) -> Option<usize> {
        let mut offset = 0;
        let mut found = None;
        for line in self.content.split_inclusive('\n') {
            if line.trim() == "]" {
                found = Some(offset);
            }
            offset += line.len();
        }
        found
    }

    /// Whether `line` (trimmed comparison) is present as a whole line.
    pub fn has_line(&self, line: &str) -> bool {
        let wanted = line.trim();
        self.content.lines().any(|l| l.trim() == wanted)
    }

    fn line_start(&self, idx: usize) -> usize {
        self.content[..idx].rfind('\n').map_or(0, |nl| nl + 1)
    }

    // ── Edits ─────────────────────────────────────────────────────────────

    /// Insert raw text at a byte offset.
    pub fn insert_at(&mut self, idx: usize, text: &str) {
        self.content.insert_str(idx, text);
        self.changed = true;
    }

    /// Insert whole lines immediately before the closing bracket of `span`.
    ///
    /// When the bracket sits on its own line the new lines go above it;
    /// otherwise they are placed on fresh lines and the bracket is pushed to
    /// the next line.
    pub fn insert_lines_before_close(&mut self, span: BlockSpan, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let line_start = self.line_start(span.close);
        let body = lines.join("\n");
        if self.content[line_start..span.close].trim().is_empty() {
            self.insert_at(line_start, &format!("{body}\n"));
        } else {
            self.insert_at(span.close, &format!("\n{body}\n"));
        }
    }

    /// Append a line, terminating the previous last line first if needed.
    pub fn append_line(&mut self, line: &str) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.content.push('\n');
        self.changed = true;
    }

    /// Replace the first occurrence of `from`. Returns `false` if absent.
    pub fn replace_first(&mut self, from: &str, to: &str) -> bool {
        match self.content.find(from) {
            Some(idx) => {
                self.content.replace_range(idx..idx + from.len(), to);
                self.changed = true;
                true
            }
            None => false,
        }
    }

    /// Prepend a line at the top of the document.
    pub fn prepend_line(&mut self, line: &str) {
        self.insert_at(0, &format!("{line}\n"));
    }

    /// Offset one past the end, for end-of-file insertion.
    pub fn end(&self) -> usize {
        self.content.len()
    }

    /// Make sure the document ends with a newline before an end-of-file
    /// insertion.
    pub fn ensure_trailing_newline(&mut self) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
            self.changed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_membership_trims_lines() {
        let doc = TextDocument::new("  foo==1.0\nbar\n");
        assert!(doc.any_line_starts_with("foo"));
        assert!(doc.any_line_starts_with("bar"));
        assert!(!doc.any_line_starts_with("baz"));
    }

    #[test]
    fn assignment_keys_skip_comments() {
        let doc = TextDocument::new("# A=1\nB=2\n\nC=x=y\nnoequals\n");
        assert_eq!(doc.assignment_keys().collect::<Vec<_>>(), vec!["B", "C"]);
    }

    #[test]
    fn list_block_finds_matching_bracket() {
        let doc = TextDocument::new("X = 1\nAPPS = [\n    \"a\",\n]\nOTHER = [\n]\n");
        let span = doc.list_block("APPS").unwrap();
        assert_eq!(&doc.as_str()[span.start..span.start + 8], "APPS = [");
        assert_eq!(&doc.as_str()[span.close..span.close + 1], "]");
        assert!(doc.list_block("MISSING").is_none());
    }

    #[test]
    fn insert_before_close_on_own_line() {
        let mut doc = TextDocument::new("APPS = [\n    \"a\",\n]\n");
        let span = doc.list_block("APPS").unwrap();
        doc.insert_lines_before_close(span, &["    \"b\",".to_string()]);
        assert_eq!(doc.as_str(), "APPS = [\n    \"a\",\n    \"b\",\n]\n");
        assert!(doc.is_changed());
    }

    #[test]
    fn insert_before_close_on_shared_line() {
        let mut doc = TextDocument::new("APPS = [\n    \"a\",]\n");
        let span = doc.list_block("APPS").unwrap();
        doc.insert_lines_before_close(span, &["    \"b\",".to_string()]);
        assert_eq!(doc.as_str(), "APPS = [\n    \"a\",\n    \"b\",\n]\n");
    }

    #[test]
    fn append_line_terminates_previous_line() {
        let mut doc = TextDocument::new("a");
        doc.append_line("b");
        assert_eq!(doc.as_str(), "a\nb\n");

        let mut empty = TextDocument::default();
        empty.append_line("x");
        assert_eq!(empty.as_str(), "x\n");
    }

    #[test]
    fn last_closing_bracket_line_picks_final_one() {
        let doc = TextDocument::new("a = [\n]\nb = [\n    1,\n]\n");
        let idx = doc.last_closing_bracket_line().unwrap();
        assert_eq!(&doc.as_str()[idx..], "]\n");
    }

    #[test]
    fn replace_first_reports_absence() {
        let mut doc = TextDocument::new("one two one");
        assert!(doc.replace_first("one", "1"));
        assert_eq!(doc.as_str(), "1 two one");
        assert!(!doc.replace_first("three", "3"));
    }
}
