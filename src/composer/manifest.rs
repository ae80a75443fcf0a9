use super::string_map;
use crate::ownership::services::is_namespaced_package;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Key under `extra` where a project lists its platform packages
pub const EXTRA_KEY: &str = "platform-audit";

/// The parts of composer.json the audit needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectManifest {
    pub name: Option<String>,
    pub require: Vec<String>,
    pub require_dev: Vec<String>,
    /// Platform patterns from `extra.platform-audit.platform-packages`
    pub platform_patterns: Vec<String>,
}

impl ProjectManifest {
    /// Direct requirements of the root project, lowercased and sorted
    ///
    /// Platform requirements (`php`, `ext-*`, ...) are not packages and are dropped.
    pub fn direct_requires(&self, include_dev: bool) -> Vec<String> {
        let dev: &[String] = if include_dev { &self.require_dev } else { &[] };

        let mut names: Vec<String> = self
            .require
            .iter()
            .chain(dev)
            .map(|name| name.to_lowercase())
            .filter(|name| is_namespaced_package(name))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[derive(Debug, Deserialize)]
struct ComposerJson {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "string_map")]
    require: BTreeMap<String, String>,
    #[serde(default, rename = "require-dev", deserialize_with = "string_map")]
    require_dev: BTreeMap<String, String>,
    #[serde(default)]
    extra: serde_json::Value,
}

/// Parses composer.json content
pub fn parse_manifest(content: &str) -> Result<ProjectManifest> {
    let manifest: ComposerJson =
        serde_json::from_str(content).context("Failed to parse composer.json file")?;

    let platform_patterns = manifest
        .extra
        .get(EXTRA_KEY)
        .and_then(|section| section.get("platform-packages"))
        .and_then(|value| value.as_array())
        .map(|patterns| {
            patterns
                .iter()
                .filter_map(|p| p.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ProjectManifest {
        name: manifest.name,
        require: manifest.require.into_keys().collect(),
        require_dev: manifest.require_dev.into_keys().collect(),
        platform_patterns,
    })
}
