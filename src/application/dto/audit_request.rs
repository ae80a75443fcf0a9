use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// AuditRequest - Internal request DTO for the audit use case
#[derive(Debug, Clone)]
pub struct AuditRequest {
    /// Path to the project directory containing composer.json and composer.lock
    pub project_path: PathBuf,
    /// Glob patterns naming platform packages
    pub platform_patterns: Vec<String>,
    /// Composer package types that mark a platform package (e.g. `drupal-core`)
    pub platform_types: Vec<String>,
    /// Whether `packages-dev` and `require-dev` take part in the audit
    pub include_dev: bool,
    /// Whether to query the advisory database
    pub check_advisories: bool,
    /// Advisory ids the user accepts, with an optional reason
    pub ignored_advisories: BTreeMap<String, Option<String>>,
}

impl AuditRequest {
    pub fn builder() -> AuditRequestBuilder {
        AuditRequestBuilder::default()
    }

    pub fn ignored_ids(&self) -> BTreeSet<String> {
        self.ignored_advisories.keys().cloned().collect()
    }
}

/// Builder for [`AuditRequest`]
///
/// Defaults: current directory, no platform patterns or types, dev
/// packages included, advisories checked.
#[derive(Debug, Clone)]
pub struct AuditRequestBuilder {
    request: AuditRequest,
}

impl Default for AuditRequestBuilder {
    fn default() -> Self {
        Self {
            request: AuditRequest {
                project_path: PathBuf::from("."),
                platform_patterns: Vec::new(),
                platform_types: Vec::new(),
                include_dev: true,
                check_advisories: true,
                ignored_advisories: BTreeMap::new(),
            },
        }
    }
}

impl AuditRequestBuilder {
    pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.request.project_path = path.into();
        self
    }

    pub fn platform_patterns(mut self, patterns: Vec<String>) -> Self {
        self.request.platform_patterns = patterns;
        self
    }

    pub fn platform_types(mut self, types: Vec<String>) -> Self {
        self.request.platform_types = types;
        self
    }

    pub fn include_dev(mut self, include_dev: bool) -> Self {
        self.request.include_dev = include_dev;
        self
    }

    pub fn check_advisories(mut self, check: bool) -> Self {
        self.request.check_advisories = check;
        self
    }

    /// Adds one accepted advisory; a later entry for the same id replaces the reason
    pub fn ignore_advisory(mut self, id: impl Into<String>, reason: Option<String>) -> Self {
        self.request.ignored_advisories.insert(id.into(), reason);
        self
    }

    pub fn build(self) -> AuditRequest {
        self.request
    }
}
