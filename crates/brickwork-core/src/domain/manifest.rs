//! Brick manifest model.
//!
//! Two layers live here:
//!
//! - [`ManifestDocument`] mirrors the on-disk YAML/JSON shape, including the
//!   legacy nested `django:` section and its key aliases. It is what the
//!   [`ManifestCodec`](crate::application::ports::ManifestCodec) port decodes
//!   into and encodes from.
//! - [`Manifest`] is the normalized, immutable view the plan compiler consumes.
//!   Top-level lists come first, nested integration lists follow.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Manifest file names probed inside a brick directory, in priority order.
pub const MANIFEST_CANDIDATES: [(&str, ManifestFormat); 3] = [
    ("brick.yaml", ManifestFormat::Yaml),
    ("brick.yml", ManifestFormat::Yaml),
    ("brick.json", ManifestFormat::Json),
];

/// File name used when a manifest is synthesized for a detected module.
pub const SYNTHESIZED_MANIFEST: &str = "brick.yaml";

/// How many requirement lines a synthesized manifest borrows from the
/// repository's root `requirements.txt`.
pub const SYNTHESIZED_REQUIREMENTS_LIMIT: usize = 20;

/// Serialization format of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A `{mount, include}` routing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub mount: String,
    pub include: String,
}

impl RouteSpec {
    pub fn new(mount: impl Into<String>, include: impl Into<String>) -> Self {
        Self {
            mount: mount.into(),
            include: include.into(),
        }
    }

    /// Mount path with a single leading `/` removed.
    pub fn normalized_mount(&self) -> &str {
        self.mount.strip_prefix('/').unwrap_or(&self.mount)
    }
}

/// An environment key with its template default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvKey {
    pub key: String,
    pub default: String,
}

impl EnvKey {
    pub fn new(key: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default: default.into(),
        }
    }

    /// Lift a raw manifest entry. Entries that are not objects with a string
    /// `key` are dropped.
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let key = object.get("key")?.as_str()?.to_string();
        let default = match object.get("default") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Some(Self { key, default })
    }
}

// ── On-disk document ──────────────────────────────────────────────────────────

/// Raw manifest document as written by brick authors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependencies: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub routing: Vec<RouteSpec>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub installed_modules: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub middleware: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub env: Vec<Value>,

    #[serde(
        default,
        alias = "django",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub integration: Option<IntegrationSection>,
}

/// Nested integration section (`integration:` or the legacy `django:`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSection {
    #[serde(
        default,
        alias = "installed_modules",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub installed_apps: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub middleware: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub settings: BTreeMap<String, Value>,

    #[serde(
        default,
        alias = "routing",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub urls: Vec<RouteSpec>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub env: Vec<Value>,
}

/// YAML authors write `dependencies:` with nothing after it; treat that like
/// an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ManifestDocument {
    /// Build the minimal document used when a repository carries a module but
    /// no manifest.
    pub fn synthesized(
        module: impl Into<String>,
        dependencies: Vec<String>,
        route: Option<RouteSpec>,
    ) -> Self {
        let module = module.into();
        Self {
            name: Some(module.clone()),
            dependencies,
            routing: route.into_iter().collect(),
            installed_modules: vec![module],
            ..Self::default()
        }
    }
}

/// First `limit` meaningful lines of a requirements file.
pub fn requirements_head(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(limit)
        .map(str::to_string)
        .collect()
}

// ── Normalized manifest ───────────────────────────────────────────────────────

/// A loaded brick manifest.
///
/// Invariant: never mutated after construction. The plan compiler only takes
/// `&Manifest`.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub name: String,
    pub dependencies: Vec<String>,
    pub routing: Vec<RouteSpec>,
    pub installed_modules: Vec<String>,
    pub middleware: Vec<String>,
    pub settings_overrides: BTreeMap<String, Value>,
    pub environment_keys: Vec<EnvKey>,
}

impl Manifest {
    /// Normalize a raw document. `fallback_name` is used when the document has
    /// no (or an empty) `name`, conventionally the brick directory name.
    pub fn from_document(document: ManifestDocument, fallback_name: &str) -> Self {
        let ManifestDocument {
            name,
            dependencies,
            mut routing,
            mut installed_modules,
            mut middleware,
            env,
            integration,
        } = document;

        let integration = integration.unwrap_or_default();
        installed_modules.extend(integration.installed_apps);
        middleware.extend(integration.middleware);
        routing.extend(integration.urls);

        let environment_keys = env
            .iter()
            .chain(integration.env.iter())
            .filter_map(EnvKey::from_value)
            .collect();

        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        Self {
            name,
            dependencies,
            routing,
            installed_modules,
            middleware,
            settings_overrides: integration.settings,
            environment_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> ManifestDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn name_falls_back_to_directory() {
        let m = Manifest::from_document(ManifestDocument::default(), "blog");
        assert_eq!(m.name, "blog");

        let m = Manifest::from_document(document(json!({ "name": "  " })), "blog");
        assert_eq!(m.name, "blog");
    }

    #[test]
    fn nested_django_section_is_merged_after_top_level() {
        let m = Manifest::from_document(
            document(json!({
                "name": "blog",
                "routing": [{ "mount": "/top/", "include": "top.urls" }],
                "django": {
                    "installed_apps": ["blog"],
                    "middleware": ["blog.middleware.Noop"],
                    "urls": [{ "mount": "/blog/", "include": "blog.urls" }],
                    "settings": { "BLOG_PAGE_SIZE": 10 }
                }
            })),
            "ignored",
        );

        assert_eq!(m.installed_modules, vec!["blog"]);
        assert_eq!(m.middleware, vec!["blog.middleware.Noop"]);
        assert_eq!(
            m.routing,
            vec![
                RouteSpec::new("/top/", "top.urls"),
                RouteSpec::new("/blog/", "blog.urls"),
            ]
        );
        assert_eq!(m.settings_overrides["BLOG_PAGE_SIZE"], json!(10));
    }

    #[test]
    fn integration_aliases_are_accepted() {
        let m = Manifest::from_document(
            document(json!({
                "integration": {
                    "installed_modules": ["shop"],
                    "routing": [{ "mount": "shop/", "include": "shop.urls" }]
                }
            })),
            "shop",
        );
        assert_eq!(m.installed_modules, vec!["shop"]);
        assert_eq!(m.routing.len(), 1);
    }

    #[test]
    fn null_lists_are_empty() {
        let m = Manifest::from_document(
            document(json!({ "dependencies": null, "django": null })),
            "x",
        );
        assert!(m.dependencies.is_empty());
        assert!(m.installed_modules.is_empty());
    }

    #[test]
    fn env_entries_keep_scalars_as_text_and_drop_junk() {
        let m = Manifest::from_document(
            document(json!({
                "env": [
                    { "key": "API_TOKEN" },
                    { "key": "PAGE_SIZE", "default": 25 },
                    { "key": "DEBUG", "default": true },
                    "not-an-object",
                    { "default": "orphan" }
                ],
                "django": { "env": [{ "key": "NESTED", "default": "yes" }] }
            })),
            "x",
        );

        assert_eq!(
            m.environment_keys,
            vec![
                EnvKey::new("API_TOKEN", ""),
                EnvKey::new("PAGE_SIZE", "25"),
                EnvKey::new("DEBUG", "true"),
                EnvKey::new("NESTED", "yes"),
            ]
        );
    }

    #[test]
    fn mount_normalization_strips_one_slash() {
        assert_eq!(RouteSpec::new("/blog/", "b").normalized_mount(), "blog/");
        assert_eq!(RouteSpec::new("blog/", "b").normalized_mount(), "blog/");
        assert_eq!(RouteSpec::new("//x", "b").normalized_mount(), "/x");
    }

    #[test]
    fn requirements_head_skips_comments_and_blanks() {
        let text = "# pinned\n\nDjango>=5\n  requests  \n# tail\nrich\n";
        assert_eq!(requirements_head(text, 2), vec!["Django>=5", "requests"]);
        assert_eq!(requirements_head(text, 10).len(), 3);
    }

    #[test]
    fn synthesized_document_registers_module() {
        let doc = ManifestDocument::synthesized(
            "blog",
            vec!["Django".into()],
            Some(RouteSpec::new("blog/", "blog.urls")),
        );
        let m = Manifest::from_document(doc, "ignored");
        assert_eq!(m.name, "blog");
        assert_eq!(m.installed_modules, vec!["blog"]);
        assert_eq!(m.routing, vec![RouteSpec::new("blog/", "blog.urls")]);
    }
}
