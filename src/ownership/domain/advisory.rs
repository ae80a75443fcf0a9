use super::Ownership;
use serde::Serialize;
use std::collections::BTreeMap;

/// Advisories known for one installed package
///
/// `advisories` maps advisory identifier to a human-readable reason.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageAdvisories {
    package_name: String,
    version: String,
    advisories: BTreeMap<String, String>,
}

impl PackageAdvisories {
    pub fn new(package_name: String, version: String, advisories: BTreeMap<String, String>) -> Self {
        Self {
            package_name,
            version,
            advisories,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn advisories(&self) -> &BTreeMap<String, String> {
        &self.advisories
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }
}

/// One advisory after the blocking decision has been made
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriagedAdvisory {
    pub id: String,
    pub package_name: String,
    pub version: String,
    pub reason: String,
    /// `None` for packages unreachable from every root
    pub ownership: Option<Ownership>,
}

/// Partition of all advisories into blocking, accepted and ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdvisoryOutcome {
    pub blocking: Vec<TriagedAdvisory>,
    /// Platform-only advisories: reported as accepted risk, never blocking
    pub accepted: Vec<TriagedAdvisory>,
    /// Advisories the caller explicitly ignored
    pub ignored: Vec<TriagedAdvisory>,
}

impl AdvisoryOutcome {
    pub fn is_blocking(&self) -> bool {
        !self.blocking.is_empty()
    }

    pub fn blocking_count(&self) -> usize {
        self.blocking.len()
    }

    /// Sorted, deduplicated identifiers of blocking advisories
    pub fn blocking_ids(&self) -> Vec<String> {
        Self::unique_ids(&self.blocking)
    }

    /// Sorted, deduplicated identifiers of accepted (platform-only) advisories
    pub fn accepted_ids(&self) -> Vec<String> {
        Self::unique_ids(&self.accepted)
    }

    pub fn total(&self) -> usize {
        self.blocking.len() + self.accepted.len() + self.ignored.len()
    }

    fn unique_ids(advisories: &[TriagedAdvisory]) -> Vec<String> {
        let mut ids: Vec<String> = advisories.iter().map(|a| a.id.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
