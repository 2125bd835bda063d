//! Routing file mutator.
//!
//! For each route the include symbol import is ensured first, then the route
//! line is inserted before the anchor comment. Without the anchor the line
//! goes before the last closing `]` line, and failing that at end of file.

use crate::domain::{action::ActionKind, manifest::RouteSpec, text::TextDocument};

/// Import line extended with `include` when present.
pub const PATH_IMPORT: &str = "from django.urls import path";
/// Import line prepended when no routing import exists at all.
pub const INCLUDE_IMPORT: &str = "from django.urls import include";

/// The exact line a route is recognized by.
pub fn route_line(route: &RouteSpec) -> String {
    format!(
        "    path(\"{}\", include(\"{}\")),",
        route.normalized_mount(),
        route.include
    )
}

/// Modules `include` may be imported from.
const INCLUDE_MODULES: [&str; 2] = ["django.urls", "django.conf.urls"];

/// Whether a routing import already names `include`, either on one line or
/// in a parenthesized multi-line import.
pub fn has_include_import(doc: &TextDocument) -> bool {
    let mut lines = doc.as_str().lines();
    while let Some(line) = lines.next() {
        let Some(names) = imported_names(line) else {
            continue;
        };
        let mut names = strip_comment(names).to_string();
        if names.trim_start().starts_with('(') {
            while !names.contains(')') {
                let Some(next) = lines.next() else { break };
                names.push(',');
                names.push_str(strip_comment(next));
            }
        }
        let lists_include = names
            .split(',')
            .map(|item| item.trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')'))
            .any(|item| item.split_whitespace().next() == Some("include"));
        if lists_include {
            return true;
        }
    }
    false
}

/// The text after `import` in `from <routing module> import ...`.
fn imported_names(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("from ")?;
    let (module, names) = rest.split_once(" import ")?;
    INCLUDE_MODULES
        .contains(&module.trim())
        .then_some(names)
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(code, _)| code)
}

/// Where route lines landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Anchor,
    ClosingBracket,
    EndOfFile,
}

/// Result of applying all routes of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOutcome {
    pub actions: Vec<ActionKind>,
    /// `true` if at least one line was inserted without the anchor.
    pub anchor_missing: bool,
}

/// Lines that would be added: the import edit (if any) followed by route
/// lines, in plan order.
pub fn pending(doc: &TextDocument, routes: &[RouteSpec]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if routes.is_empty() {
        return lines;
    }
    if !has_include_import(doc) {
        lines.push(if doc.contains(PATH_IMPORT) {
            format!("{PATH_IMPORT}, include")
        } else {
            INCLUDE_IMPORT.to_string()
        });
    }
    for route in routes {
        let line = route_line(route);
        if !doc.contains(&line) && !lines.contains(&line) {
            lines.push(line);
        }
    }
    lines
}

/// Ensure the import and each route line.
pub fn apply(doc: &mut TextDocument, routes: &[RouteSpec], anchor: &str) -> RouteOutcome {
    let mut outcome = RouteOutcome::default();

    for route in routes {
        if ensure_include_import(doc) {
            outcome.actions.push(ActionKind::ImportInclude);
        }

        let line = route_line(route);
        if doc.contains(&line) {
            continue;
        }

        let placement = insert_route_line(doc, &line, anchor);
        if placement != Placement::Anchor {
            outcome.anchor_missing = true;
        }
        outcome.actions.push(ActionKind::Route {
            mount: route.normalized_mount().to_string(),
            include: route.include.clone(),
        });
    }

    outcome
}

/// Returns `true` if the document was edited.
fn ensure_include_import(doc: &mut TextDocument) -> bool {
    if has_include_import(doc) {
        return false;
    }
    if !doc.replace_first(PATH_IMPORT, &format!("{PATH_IMPORT}, include")) {
        doc.prepend_line(INCLUDE_IMPORT);
    }
    true
}

fn insert_route_line(doc: &mut TextDocument, line: &str, anchor: &str) -> Placement {
    let text = format!("{line}\n");
    if let Some(idx) = doc.line_start_of(anchor) {
        doc.insert_at(idx, &text);
        return Placement::Anchor;
    }
    if let Some(idx) = doc.last_closing_bracket_line() {
        doc.insert_at(idx, &text);
        return Placement::ClosingBracket;
    }
    doc.ensure_trailing_newline();
    let end = doc.end();
    doc.insert_at(end, &text);
    Placement::EndOfFile
}
