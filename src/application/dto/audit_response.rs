use crate::ownership::domain::{AdvisoryOutcome, Ownership};
use crate::shared::error::AuditError;
use std::collections::BTreeMap;

/// AuditResponse - result of the audit use case
///
/// Formatters render it; the binary derives the exit code from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResponse {
    /// `name` from composer.json, if any
    pub project_name: Option<String>,
    /// Number of installed packages in the graph
    pub package_count: usize,
    /// Ownership of every package reachable from a root
    pub ownership: BTreeMap<String, Ownership>,
    pub platform_roots: Vec<String>,
    pub direct_requires: Vec<String>,
    /// Platform roots that are not installed
    pub missing_platform_roots: Vec<String>,
    /// `None` when advisories were not checked
    pub advisory_outcome: Option<AdvisoryOutcome>,
    /// Reasons given for ignored advisories, by id
    pub ignore_reasons: BTreeMap<String, String>,
}

impl AuditResponse {
    /// Number of packages per ownership label, every label present
    pub fn ownership_counts(&self) -> BTreeMap<Ownership, usize> {
        let mut counts: BTreeMap<Ownership, usize> =
            Ownership::ALL.iter().map(|o| (*o, 0)).collect();
        for ownership in self.ownership.values() {
            *counts.entry(*ownership).or_default() += 1;
        }
        counts
    }

    /// Sorted package names carrying the given label
    pub fn packages_with(&self, ownership: Ownership) -> Vec<&str> {
        self.ownership
            .iter()
            .filter(|(_, o)| **o == ownership)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Installed packages unreachable from every root
    pub fn unclassified_count(&self) -> usize {
        self.package_count.saturating_sub(self.ownership.len())
    }

    pub fn is_blocking(&self) -> bool {
        self.advisory_outcome
            .as_ref()
            .is_some_and(AdvisoryOutcome::is_blocking)
    }

    /// The error the binary fails with after presenting the report
    pub fn blocking_error(&self) -> Option<AuditError> {
        let outcome = self.advisory_outcome.as_ref()?;
        if !outcome.is_blocking() {
            return None;
        }

        // one advisory can hit several packages; count distinct ids
        let ids = outcome.blocking_ids();
        Some(AuditError::BlockingAdvisories {
            count: ids.len(),
            ids,
        })
    }
}
