//! Integration plan and its compiler.
//!
//! [`compile`] is a pure, total function: every manifest compiles, absent
//! lists become empty sections, and nothing is validated across fields. A
//! route whose module is never registered is carried through as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::manifest::{EnvKey, Manifest, RouteSpec};

/// Merge strategy recorded on captured settings blocks.
pub const DEEP_MERGE: &str = "deep_merge";

/// Side-effect-free projection of a manifest into the mutation categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub requirements: Vec<Requirement>,
    pub settings: SettingsPlan,
    pub urls: Vec<RouteSpec>,
    pub env: Vec<EnvKey>,
    pub files: Vec<ModuleCopy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsPlan {
    pub installed_apps: Vec<String>,
    pub middleware: Vec<String>,
    /// Captured settings overrides. Never applied by any mutator.
    pub blocks: Vec<SettingsBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsBlock {
    pub key_path: Vec<String>,
    pub merge_strategy: String,
    pub value: BTreeMap<String, Value>,
}

/// A module directory the copier will look for inside the brick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCopy {
    pub module: String,
}

/// Compile a manifest into a plan.
pub fn compile(manifest: &Manifest) -> Plan {
    let blocks = if manifest.settings_overrides.is_empty() {
        Vec::new()
    } else {
        vec![SettingsBlock {
            key_path: Vec::new(),
            merge_strategy: DEEP_MERGE.to_string(),
            value: manifest.settings_overrides.clone(),
        }]
    };

    Plan {
        requirements: manifest
            .dependencies
            .iter()
            .map(|name| Requirement { name: name.clone() })
            .collect(),
        settings: SettingsPlan {
            installed_apps: manifest.installed_modules.clone(),
            middleware: manifest.middleware.clone(),
            blocks,
        },
        urls: manifest.routing.clone(),
        env: manifest.environment_keys.clone(),
        files: manifest
            .installed_modules
            .iter()
            .map(|module| ModuleCopy {
                module: module.clone(),
            })
            .collect(),
    }
}

impl Plan {
    /// Pretty JSON rendering used by `plan`, `apply` and `diff`.
    pub fn to_pretty_json(&self) -> String {
        // Plan holds only strings, vectors and JSON values; serialization
        // cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(|r| r.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
            && self.settings.installed_apps.is_empty()
            && self.settings.middleware.is_empty()
            && self.urls.is_empty()
            && self.env.is_empty()
    }
}
