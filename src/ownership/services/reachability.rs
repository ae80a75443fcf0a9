use crate::ownership::domain::PackageGraph;
use std::collections::{HashSet, VecDeque};

/// Default edge filter: only `vendor/package` names are real packages
///
/// Requirements such as `php`, `ext-json` or `lib-icu` describe the
/// platform the code runs on and are never installed.
pub fn is_namespaced_package(name: &str) -> bool {
    name.contains('/')
}

/// ReachabilityWalker - multi-source breadth-first traversal over a PackageGraph
///
/// Barrier nodes are visited but their outgoing edges are not expanded.
/// The edge filter decides which requirement targets are worth enqueueing,
/// which keeps the walker usable on synthetic graphs without Composer naming.
pub struct ReachabilityWalker<F = fn(&str) -> bool> {
    edge_filter: F,
}

impl ReachabilityWalker {
    pub fn new() -> Self {
        Self {
            edge_filter: is_namespaced_package,
        }
    }
}

impl Default for ReachabilityWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> ReachabilityWalker<F>
where
    F: Fn(&str) -> bool,
{
    pub fn with_edge_filter(edge_filter: F) -> Self {
        Self { edge_filter }
    }

    /// Names reachable from `roots` with no barriers
    pub fn reachable<S: AsRef<str>>(&self, graph: &PackageGraph, roots: &[S]) -> HashSet<String> {
        self.reachable_with_barriers(graph, roots, &HashSet::new())
    }

    /// Names reachable from `roots`, never expanding past a barrier
    ///
    /// Roots are always part of the result, even when absent from the graph
    /// or listed as barriers. Each node is visited at most once, so cycles
    /// terminate and the cost is O(V + E).
    pub fn reachable_with_barriers<S: AsRef<str>>(
        &self,
        graph: &PackageGraph,
        roots: &[S],
        barriers: &HashSet<String>,
    ) -> HashSet<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<&str> = roots.iter().map(|root| root.as_ref()).collect();

        while let Some(name) = queue.pop_front() {
            if !visited.insert(name.to_string()) {
                continue;
            }

            if barriers.contains(name) {
                continue;
            }

            for requirement in graph.requirements_of(name) {
                let target = requirement.target();
                if (self.edge_filter)(target) && !visited.contains(target) {
                    queue.push_back(target);
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::domain::Package;

    fn pkg(name: &str, requires: &[&str]) -> Package {
        requires.iter().fold(
            Package::new(name.to_string(), "1.0.0".to_string()).unwrap(),
            |package, target| package.with_requirement(*target, "*"),
        )
    }

    fn names(set: &HashSet<String>) -> Vec<&str> {
        let mut v: Vec<&str> = set.iter().map(String::as_str).collect();
        v.sort();
        v
    }

    fn barriers(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_reachable_includes_roots_and_descendants() {
        let graph = PackageGraph::from_packages(vec![
            pkg("v/a", &["v/b"]),
            pkg("v/b", &["v/c"]),
            pkg("v/c", &[]),
            pkg("v/unrelated", &[]),
        ]);

        let result = ReachabilityWalker::new().reachable(&graph, &["v/a"]);
        assert_eq!(names(&result), vec!["v/a", "v/b", "v/c"]);
    }

    #[test]
    fn test_multi_source() {
        let graph = PackageGraph::from_packages(vec![
            pkg("v/a", &["v/x"]),
            pkg("v/b", &["v/y"]),
            pkg("v/x", &[]),
            pkg("v/y", &[]),
        ]);

        let result = ReachabilityWalker::new().reachable(&graph, &["v/a", "v/b"]);
        assert_eq!(names(&result), vec!["v/a", "v/b", "v/x", "v/y"]);
    }

    #[test]
    fn test_barrier_is_visited_but_not_expanded() {
        let graph = PackageGraph::from_packages(vec![
            pkg("v/lib", &["v/platform"]),
            pkg("v/platform", &["v/inner"]),
            pkg("v/inner", &[]),
        ]);

        let result = ReachabilityWalker::new().reachable_with_barriers(
            &graph,
            &["v/lib"],
            &barriers(&["v/platform"]),
        );
        assert_eq!(names(&result), vec!["v/lib", "v/platform"]);
    }

    #[test]
    fn test_barrier_does_not_hide_independent_path() {
        let graph = PackageGraph::from_packages(vec![
            pkg("v/lib", &["v/platform", "v/inner"]),
            pkg("v/platform", &["v/inner", "v/deep"]),
            pkg("v/inner", &[]),
            pkg("v/deep", &[]),
        ]);

        let result = ReachabilityWalker::new().reachable_with_barriers(
            &graph,
            &["v/lib"],
            &barriers(&["v/platform"]),
        );
        assert_eq!(names(&result), vec!["v/inner", "v/lib", "v/platform"]);
    }

    #[test]
    fn test_root_that_is_barrier_is_visited_not_expanded() {
        let graph = PackageGraph::from_packages(vec![pkg("v/a", &["v/b"]), pkg("v/b", &[])]);

        let result =
            ReachabilityWalker::new().reachable_with_barriers(&graph, &["v/a"], &barriers(&["v/a"]));
        assert_eq!(names(&result), vec!["v/a"]);
    }

    #[test]
    fn test_barriers_are_per_call() {
        let graph = PackageGraph::from_packages(vec![pkg("v/a", &["v/b"]), pkg("v/b", &[])]);
        let walker = ReachabilityWalker::new();

        let limited = walker.reachable_with_barriers(&graph, &["v/a"], &barriers(&["v/a"]));
        let unlimited = walker.reachable(&graph, &["v/a"]);
        assert_eq!(limited.len(), 1);
        assert_eq!(unlimited.len(), 2);
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = PackageGraph::from_packages(vec![
            pkg("v/a", &["v/b"]),
            pkg("v/b", &["v/c"]),
            pkg("v/c", &["v/a"]),
        ]);

        let result = ReachabilityWalker::new().reachable(&graph, &["v/a"]);
        assert_eq!(names(&result), vec!["v/a", "v/b", "v/c"]);
    }

    #[test]
    fn test_platform_requirements_are_filtered() {
        let graph = PackageGraph::from_packages(vec![pkg("v/a", &["php", "ext-json", "v/b"]), pkg("v/b", &[])]);

        let result = ReachabilityWalker::new().reachable(&graph, &["v/a"]);
        assert_eq!(names(&result), vec!["v/a", "v/b"]);
    }

    #[test]
    fn test_absent_root_and_dangling_edges_are_tolerated() {
        let graph = PackageGraph::from_packages(vec![pkg("v/a", &["v/missing"])]);
        let walker = ReachabilityWalker::new();

        let from_absent = walker.reachable(&graph, &["v/ghost"]);
        assert_eq!(names(&from_absent), vec!["v/ghost"]);

        let dangling = walker.reachable(&graph, &["v/a"]);
        assert_eq!(names(&dangling), vec!["v/a", "v/missing"]);
    }

    #[test]
    fn test_empty_roots_and_empty_graph() {
        let graph = PackageGraph::from_packages(Vec::new());
        let roots: [&str; 0] = [];
        assert!(ReachabilityWalker::new().reachable(&graph, &roots).is_empty());
    }

    #[test]
    fn test_custom_edge_filter_for_synthetic_graphs() {
        let graph = PackageGraph::from_packages(vec![pkg("a", &["b"]), pkg("b", &["c"]), pkg("c", &[])]);

        let default_walker = ReachabilityWalker::new();
        assert_eq!(names(&default_walker.reachable(&graph, &["a"])), vec!["a"]);

        let accept_all = ReachabilityWalker::with_edge_filter(|_: &str| true);
        assert_eq!(names(&accept_all.reachable(&graph, &["a"])), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let graph = PackageGraph::from_packages(vec![
            pkg("v/a", &["v/b", "v/c"]),
            pkg("v/b", &["v/c"]),
            pkg("v/c", &["v/a"]),
        ]);
        let walker = ReachabilityWalker::new();
        let b = barriers(&["v/b"]);

        let first = walker.reachable_with_barriers(&graph, &["v/a"], &b);
        let second = walker.reachable_with_barriers(&graph, &["v/a"], &b);
        assert_eq!(first, second);
        assert_eq!(graph.len(), 3);
    }
}
