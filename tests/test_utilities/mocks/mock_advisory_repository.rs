use async_trait::async_trait;
use platform_audit::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Mock AdvisoryRepository serving canned advisories per package name
#[derive(Default)]
pub struct MockAdvisoryRepository {
    advisories: HashMap<String, BTreeMap<String, String>>,
    should_fail: bool,
}

impl MockAdvisoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            advisories: HashMap::new(),
            should_fail: true,
        }
    }

    pub fn with_advisory(mut self, package: &str, id: &str, reason: &str) -> Self {
        self.advisories
            .entry(package.to_string())
            .or_default()
            .insert(id.to_string(), reason.to_string());
        self
    }
}

#[async_trait]
impl AdvisoryRepository for MockAdvisoryRepository {
    async fn fetch_advisories(
        &self,
        packages: Vec<Package>,
        progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageAdvisories>> {
        if self.should_fail {
            anyhow::bail!("Mock advisory lookup failure");
        }

        progress_callback(0, 1);
        let result = packages
            .iter()
            .filter_map(|package| {
                self.advisories.get(package.name()).map(|advisories| {
                    PackageAdvisories::new(
                        package.name().to_string(),
                        package.version().to_string(),
                        advisories.clone(),
                    )
                })
            })
            .collect();
        progress_callback(1, 1);

        Ok(result)
    }
}
