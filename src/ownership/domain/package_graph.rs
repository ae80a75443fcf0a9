use super::{Package, Requirement};
use std::collections::HashMap;

/// PackageGraph aggregate: the locked packages indexed by name
///
/// Edges live on the packages themselves; a requirement target that is not
/// a key of the map is a dangling edge and is simply never expanded.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    packages: HashMap<String, Package>,
}

impl PackageGraph {
    /// Builds the graph from a repository of packages
    ///
    /// When the same name appears twice the later package wins.
    pub fn from_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        let packages = packages
            .into_iter()
            .map(|package| (package.name().to_string(), package))
            .collect();

        Self { packages }
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Requirement edges of `name`; empty when the package is not installed
    pub fn requirements_of(&self, name: &str) -> &[Requirement] {
        self.packages
            .get(name)
            .map(|package| package.requires())
            .unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.packages.values().map(|p| p.requires().len()).sum()
    }
}
