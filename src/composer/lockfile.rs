use super::string_map;
use crate::ownership::domain::Package;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Packages extracted from a composer.lock file
#[derive(Debug, Clone, Default)]
pub struct LockfileParseResult {
    pub packages: Vec<Package>,
    /// Entries that could not be turned into packages, with the reason
    pub skipped: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ComposerLock {
    #[serde(default)]
    packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
    #[serde(default, rename = "type")]
    package_type: Option<String>,
    #[serde(default, deserialize_with = "string_map")]
    require: BTreeMap<String, String>,
}

/// Parses composer.lock content into domain packages
///
/// # Arguments
/// * `content` - Raw composer.lock JSON
/// * `include_dev` - Whether `packages-dev` entries belong to the graph
///
/// # Errors
/// Returns an error when the content is not a JSON document of the
/// expected shape. Individual packages with invalid names or versions are
/// skipped and listed in [`LockfileParseResult::skipped`].
pub fn parse_lockfile(content: &str, include_dev: bool) -> Result<LockfileParseResult> {
    let lock: ComposerLock =
        serde_json::from_str(content).context("Failed to parse composer.lock file")?;

    let dev_packages = if include_dev {
        lock.packages_dev
    } else {
        Vec::new()
    };

    let mut result = LockfileParseResult::default();

    for locked in lock.packages.into_iter().chain(dev_packages) {
        match into_package(locked) {
            Ok(package) => result.packages.push(package),
            Err(e) => result.skipped.push(e.to_string()),
        }
    }

    Ok(result)
}

fn into_package(locked: LockedPackage) -> Result<Package> {
    let name = locked.name.clone();
    let mut package = Package::new(locked.name, locked.version)
        .with_context(|| format!("Skipping locked package '{}'", name))?;

    if let Some(package_type) = locked.package_type {
        package = package.with_type(package_type);
    }

    Ok(locked
        .require
        .into_iter()
        .fold(package, |package, (target, constraint)| {
            package.with_requirement(target, constraint)
        }))
}
