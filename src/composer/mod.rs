//! Composer file formats: composer.lock and composer.json

pub mod lockfile;
pub mod manifest;

pub use lockfile::{parse_lockfile, LockfileParseResult};
pub use manifest::{parse_manifest, ProjectManifest};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

pub const LOCKFILE_NAME: &str = "composer.lock";
pub const MANIFEST_NAME: &str = "composer.json";

/// Deserializes a `{"name": "constraint"}` map
///
/// PHP's json_encode writes an empty map as `[]`, so an empty array is
/// accepted too. Non-string values (rare, hand-edited files) are dropped.
fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key, v.to_string())))
            .collect()),
        serde_json::Value::Array(items) if items.is_empty() => Ok(BTreeMap::new()),
        serde_json::Value::Null => Ok(BTreeMap::new()),
        other => Err(D::Error::custom(format!(
            "expected an object of package constraints, found {}",
            other
        ))),
    }
}
