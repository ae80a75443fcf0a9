use super::ReachabilityWalker;
use crate::ownership::domain::{Ownership, PackageGraph};
use std::collections::{BTreeMap, HashSet};

/// OwnershipClassifier service
///
/// Runs the reachability walk twice: once from the platform roots with no
/// constraint, and once from the user's own roots with every platform root
/// acting as a barrier. A user library that happens to require a platform
/// package therefore only drags in the platform root itself, never its
/// transitive closure.
pub struct OwnershipClassifier<F = fn(&str) -> bool> {
    walker: ReachabilityWalker<F>,
}

impl OwnershipClassifier {
    pub fn new() -> Self {
        Self {
            walker: ReachabilityWalker::new(),
        }
    }
}

impl Default for OwnershipClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> OwnershipClassifier<F>
where
    F: Fn(&str) -> bool,
{
    pub fn with_walker(walker: ReachabilityWalker<F>) -> Self {
        Self { walker }
    }

    /// Assigns an ownership label to every package reachable from either root set
    ///
    /// # Arguments
    /// * `graph` - The locked package graph
    /// * `platform_roots` - Names identified as platform (framework) packages
    /// * `direct_requires` - Names the root project requires directly
    ///
    /// # Returns
    /// Package name to ownership, for packages present in the graph. Packages
    /// unreachable from both root sets are omitted.
    pub fn classify<P, D>(
        &self,
        graph: &PackageGraph,
        platform_roots: &[P],
        direct_requires: &[D],
    ) -> BTreeMap<String, Ownership>
    where
        P: AsRef<str>,
        D: AsRef<str>,
    {
        let platform: HashSet<String> = platform_roots
            .iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let direct: HashSet<&str> = direct_requires.iter().map(|name| name.as_ref()).collect();

        let user_roots: Vec<&str> = direct_requires
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !platform.contains(*name))
            .collect();

        let platform_reachable = self.walker.reachable(graph, platform_roots);
        let user_reachable = self
            .walker
            .reachable_with_barriers(graph, &user_roots, &platform);

        let mut ownership = BTreeMap::new();

        for name in graph.names() {
            let label = if direct.contains(name) {
                Some(Ownership::Direct)
            } else {
                match (
                    platform_reachable.contains(name),
                    user_reachable.contains(name),
                ) {
                    (true, true) => Some(Ownership::Shared),
                    (true, false) => Some(Ownership::PlatformOnly),
                    (false, true) => Some(Ownership::UserTransitive),
                    (false, false) => None,
                }
            };

            if let Some(label) = label {
                ownership.insert(name.to_string(), label);
            }
        }

        // platform roots are roots the project opted into
        for root in &platform {
            if graph.contains(root) {
                ownership.insert(root.clone(), Ownership::Direct);
            }
        }

        ownership
    }

    /// Names classified `PlatformOnly`: their advisories never block
    pub fn platform_only_names<P, D>(
        &self,
        graph: &PackageGraph,
        platform_roots: &[P],
        direct_requires: &[D],
    ) -> Vec<String>
    where
        P: AsRef<str>,
        D: AsRef<str>,
    {
        self.classify(graph, platform_roots, direct_requires)
            .into_iter()
            .filter(|(_, ownership)| *ownership == Ownership::PlatformOnly)
            .map(|(name, _)| name)
            .collect()
    }

    /// Platform roots that are not installed in the graph
    ///
    /// `classify` skips these silently; callers decide whether to report them.
    pub fn missing_platform_roots<P: AsRef<str>>(
        &self,
        graph: &PackageGraph,
        platform_roots: &[P],
    ) -> Vec<String> {
        let mut missing: Vec<String> = platform_roots
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !graph.contains(name))
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}
