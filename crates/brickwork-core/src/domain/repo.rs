//! Repository references accepted by `install`.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::error::DomainError;

const SHORTHAND_HOST: &str = "https://github.com";
const URL_SCHEMES: [&str; 5] = ["https://", "http://", "ssh://", "git://", "file://"];

fn shorthand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("shorthand pattern is valid")
    })
}

fn scp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+:[^\s]+$").expect("scp pattern is valid")
    })
}

/// A normalized, clonable repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    url: String,
}

impl RepoRef {
    /// Normalize user input.
    ///
    /// Accepted forms: a URL with a known scheme (optionally `.git`-suffixed),
    /// an scp-style `user@host:path`, or `owner/name` which expands to a
    /// GitHub HTTPS URL. Anything else is [`DomainError::UnrecognizedRepoFormat`].
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let unrecognized = || DomainError::UnrecognizedRepoFormat {
            input: input.to_string(),
        };

        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(unrecognized());
        }

        if let Some(scheme) = URL_SCHEMES.iter().find(|s| trimmed.starts_with(**s)) {
            if trimmed.len() == scheme.len() {
                return Err(unrecognized());
            }
            return Ok(Self {
                url: trimmed.to_string(),
            });
        }

        if scp_pattern().is_match(trimmed) {
            return Ok(Self {
                url: trimmed.to_string(),
            });
        }

        if shorthand_pattern().is_match(trimmed) {
            let shorthand = trimmed.strip_suffix(".git").unwrap_or(trimmed);
            return Ok(Self {
                url: format!("{SHORTHAND_HOST}/{shorthand}.git"),
            });
        }

        Err(unrecognized())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last path segment without `.git`, used to label checkouts.
    pub fn repo_name(&self) -> &str {
        let tail = self
            .url
            .trim_end_matches('/')
            .rsplit(['/', ':'])
            .next()
            .unwrap_or(&self.url);
        tail.strip_suffix(".git").unwrap_or(tail)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_urls_are_kept() {
        let r = RepoRef::parse("https://gitlab.com/acme/blog-brick").unwrap();
        assert_eq!(r.url(), "https://gitlab.com/acme/blog-brick");
        let r = RepoRef::parse("https://github.com/acme/blog.git").unwrap();
        assert_eq!(r.url(), "https://github.com/acme/blog.git");
        assert_eq!(r.repo_name(), "blog");
    }

    #[test]
    fn shorthand_expands_to_github() {
        let r = RepoRef::parse("acme/blog-brick").unwrap();
        assert_eq!(r.url(), "https://github.com/acme/blog-brick.git");
        assert_eq!(r.repo_name(), "blog-brick");

        let r = RepoRef::parse("acme/blog.git").unwrap();
        assert_eq!(r.url(), "https://github.com/acme/blog.git");
    }

    #[test]
    fn scp_style_is_accepted() {
        let r = RepoRef::parse("git@github.com:acme/blog.git").unwrap();
        assert_eq!(r.repo_name(), "blog");
    }

    #[test]
    fn garbage_is_rejected() {
        for input in ["not a repo!!", "", "   ", "justaname", "a/b/c", "https://", "own er/name"] {
            assert!(
                matches!(
                    RepoRef::parse(input),
                    Err(DomainError::UnrecognizedRepoFormat { .. })
                ),
                "{input:?} should be rejected"
            );
        }
    }
}
