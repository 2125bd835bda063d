//! Manifest codec backed by serde_yaml and serde_json.

use brickwork_core::{
    application::ports::ManifestCodec,
    domain::{ManifestDocument, ManifestFormat},
};

/// Decodes `brick.yaml`/`brick.yml` with serde_yaml and `brick.json` with
/// serde_json.
///
/// An empty or `null` YAML document decodes to an empty manifest. Anything
/// that is not a mapping is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeManifestCodec;

impl SerdeManifestCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestCodec for SerdeManifestCodec {
    fn decode(&self, format: ManifestFormat, text: &str) -> Result<ManifestDocument, String> {
        match format {
            ManifestFormat::Yaml => {
                if text.trim().is_empty() {
                    return Ok(ManifestDocument::default());
                }
                serde_yaml::from_str::<Option<ManifestDocument>>(text)
                    .map(Option::unwrap_or_default)
                    .map_err(|e| e.to_string())
            }
            ManifestFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }

    fn encode(
        &self,
        format: ManifestFormat,
        document: &ManifestDocument,
    ) -> Result<String, String> {
        match format {
            ManifestFormat::Yaml => serde_yaml::to_string(document).map_err(|e| e.to_string()),
            ManifestFormat::Json => {
                serde_json::to_string_pretty(document).map_err(|e| e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickwork_core::domain::{Manifest, RouteSpec};

    #[test]
    fn decodes_nested_integration_section() {
        let yaml = r#"
name: blog
dependencies: [markdown]
django:
  installed_apps: [blog]
  middleware: [blog.middleware.Track]
  urls:
    - mount: /blog/
      include: blog.urls
env:
  - key: BLOG_TITLE
    default: My blog
"#;
        let doc = SerdeManifestCodec.decode(ManifestFormat::Yaml, yaml).unwrap();
        let manifest = Manifest::from_document(doc, "fallback");
        assert_eq!(manifest.name, "blog");
        assert_eq!(manifest.installed_modules, vec!["blog"]);
        assert_eq!(manifest.middleware, vec!["blog.middleware.Track"]);
        assert_eq!(manifest.routing, vec![RouteSpec::new("/blog/", "blog.urls")]);
        assert_eq!(manifest.environment_keys[0].default, "My blog");
    }

    #[test]
    fn empty_yaml_is_empty_manifest() {
        let doc = SerdeManifestCodec.decode(ManifestFormat::Yaml, "").unwrap();
        assert_eq!(doc, ManifestDocument::default());
        let doc = SerdeManifestCodec.decode(ManifestFormat::Yaml, "~\n").unwrap();
        assert_eq!(doc, ManifestDocument::default());
    }

    #[test]
    fn non_mapping_is_rejected() {
        assert!(SerdeManifestCodec.decode(ManifestFormat::Yaml, "- a\n- b\n").is_err());
        assert!(SerdeManifestCodec.decode(ManifestFormat::Json, "[1, 2]").is_err());
        assert!(SerdeManifestCodec.decode(ManifestFormat::Json, "{").is_err());
    }

    #[test]
    fn json_manifest_decodes() {
        let json = r#"{"name": "shop", "dependencies": ["stripe"], "routing": [{"mount": "shop/", "include": "shop.urls"}]}"#;
        let doc = SerdeManifestCodec.decode(ManifestFormat::Json, json).unwrap();
        assert_eq!(doc.name.as_deref(), Some("shop"));
        assert_eq!(doc.routing.len(), 1);
    }

    #[test]
    fn synthesized_document_survives_yaml() {
        let doc = ManifestDocument::synthesized(
            "blog",
            vec!["markdown".into()],
            Some(RouteSpec::new("blog/", "blog.urls")),
        );
        let text = SerdeManifestCodec.encode(ManifestFormat::Yaml, &doc).unwrap();
        assert!(text.contains("name: blog"));
        let back = SerdeManifestCodec.decode(ManifestFormat::Yaml, &text).unwrap();
        assert_eq!(back, doc);
    }
}
