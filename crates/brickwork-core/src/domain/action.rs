//! Concrete actions recorded in the ledger.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One change actually performed against a target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Project-relative path, `/`-separated.
    pub file: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
}

impl Action {
    pub fn new(file: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            file: file.into(),
            kind,
        }
    }
}

/// What an action did. Serialized as the compact tag stored in the ledger
/// (`add:requests`, `url:blog/->blog.urls`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActionKind {
    /// A package line appended to the requirements file.
    AddRequirement(String),
    /// A module directory copied from the brick.
    CreateDir,
    /// An entry inserted into a named list-block.
    AddBlockEntry { block: String, entry: String },
    /// The include symbol import added to the routing file.
    ImportInclude,
    /// A route line inserted into the routing file.
    Route { mount: String, include: String },
    /// A key appended to the environment template.
    EnvKey(String),
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddRequirement(name) => write!(f, "add:{name}"),
            Self::CreateDir => write!(f, "create_dir"),
            Self::AddBlockEntry { block, entry } => write!(f, "add:{block}:{entry}"),
            Self::ImportInclude => write!(f, "import:include"),
            Self::Route { mount, include } => write!(f, "url:{mount}->{include}"),
            Self::EnvKey(key) => write!(f, "env:{key}"),
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "create_dir" {
            return Ok(Self::CreateDir);
        }
        if s == "import:include" {
            return Ok(Self::ImportInclude);
        }
        if let Some(rest) = s.strip_prefix("url:") {
            let (mount, include) = rest
                .split_once("->")
                .ok_or_else(|| format!("malformed route action '{s}'"))?;
            return Ok(Self::Route {
                mount: mount.to_string(),
                include: include.to_string(),
            });
        }
        if let Some(key) = s.strip_prefix("env:") {
            return Ok(Self::EnvKey(key.to_string()));
        }
        if let Some(rest) = s.strip_prefix("add:") {
            // Block names are upper-case identifiers; package specs never
            // contain a ':' before a valid block separator.
            if let Some((block, entry)) = rest.split_once(':') {
                if !block.is_empty() && block.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
                    return Ok(Self::AddBlockEntry {
                        block: block.to_string(),
                        entry: entry.to_string(),
                    });
                }
            }
            return Ok(Self::AddRequirement(rest.to_string()));
        }
        Err(format!("unknown action type '{s}'"))
    }
}

impl TryFrom<String> for ActionKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back() {
        let kinds = [
            ActionKind::AddRequirement("Django>=5.0".into()),
            ActionKind::CreateDir,
            ActionKind::AddBlockEntry {
                block: "INSTALLED_APPS".into(),
                entry: "blog".into(),
            },
            ActionKind::ImportInclude,
            ActionKind::Route {
                mount: "blog/".into(),
                include: "blog.urls".into(),
            },
            ActionKind::EnvKey("SECRET_KEY".into()),
        ];
        for kind in kinds {
            assert_eq!(kind.to_string().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn action_serializes_with_type_tag() {
        let action = Action::new("requirements.txt", ActionKind::AddRequirement("y".into()));
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["file"], "requirements.txt");
        assert_eq!(json["type"], "add:y");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!("delete:everything".parse::<ActionKind>().is_err());
        assert!("url:no-arrow".parse::<ActionKind>().is_err());
    }

    #[test]
    fn lowercase_prefix_is_a_requirement() {
        assert_eq!(
            "add:git+https://x".parse::<ActionKind>().unwrap(),
            ActionKind::AddRequirement("git+https://x".into())
        );
    }
}
