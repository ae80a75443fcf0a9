use crate::ownership::domain::{ComposerVersion, Package, PackageAdvisories, VersionConstraint};
use crate::ports::outbound::{AdvisoryRepository, ProgressCallback};
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Packagist security advisory API client
///
/// Queries `GET /api/security-advisories/?packages[]=...` in batches.
/// A failed batch is reported on stderr and contributes no advisories;
/// it never aborts the audit.
pub struct PackagistAdvisoryClient {
    client: reqwest::Client,
    api_url: String,
}

impl PackagistAdvisoryClient {
    const API_ENDPOINT: &'static str = "https://packagist.org/api/security-advisories/";
    const TIMEOUT_SECONDS: u64 = 30;
    const MAX_BATCH_SIZE: usize = 50;
    const MAX_CONCURRENT: usize = 4;

    /// Creates a new Packagist client with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("platform-audit/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: Self::API_ENDPOINT.to_string(),
        })
    }

    /// Points the client at another advisory endpoint (mirrors, tests)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn batch_url(&self, packages: &[Package]) -> String {
        let query = packages
            .iter()
            .map(|pkg| format!("packages[]={}", urlencoding::encode(pkg.name())))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.api_url, query)
    }

    async fn fetch_batch(&self, packages: &[Package]) -> Result<PackagistResponse> {
        let response = self.client.get(self.batch_url(packages)).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Packagist API returned status code {}", response.status());
        }

        let body: PackagistResponse = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl AdvisoryRepository for PackagistAdvisoryClient {
    async fn fetch_advisories(
        &self,
        packages: Vec<Package>,
        progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageAdvisories>> {
        let batches: Vec<Vec<Package>> = packages
            .chunks(Self::MAX_BATCH_SIZE)
            .map(<[Package]>::to_vec)
            .collect();
        let total = batches.len();
        let completed = AtomicUsize::new(0);
        progress_callback(0, total);

        let responses: Vec<Vec<PackageAdvisories>> = stream::iter(batches)
            .map(|batch| {
                let completed = &completed;
                let progress_callback = &progress_callback;
                async move {
                    let advisories = match self.fetch_batch(&batch).await {
                        Ok(response) => convert_response(&batch, response),
                        Err(e) => {
                            eprintln!(
                                "Warning: Failed to fetch advisories for {} package(s): {}",
                                batch.len(),
                                e
                            );
                            Vec::new()
                        }
                    };
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    progress_callback(done, total);
                    advisories
                }
            })
            .buffer_unordered(Self::MAX_CONCURRENT)
            .collect()
            .await;

        let mut all: Vec<PackageAdvisories> = responses.into_iter().flatten().collect();
        all.sort_by(|a, b| a.package_name().cmp(b.package_name()));
        Ok(all)
    }
}

// Packagist API response structures

#[derive(Debug, Default, Deserialize)]
struct PackagistResponse {
    /// An object keyed by package name; PHP serializes an empty one as `[]`
    #[serde(default)]
    advisories: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackagistAdvisory {
    #[serde(default)]
    advisory_id: Option<String>,
    #[serde(default)]
    package_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    cve: Option<String>,
    #[serde(default)]
    affected_versions: Option<String>,
}

impl PackagistAdvisory {
    fn reason(&self, id: &str) -> String {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(id);

        match self.cve.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(cve) => format!("{} ({})", title, cve),
            None => title.to_string(),
        }
    }

    /// Whether the advisory applies to the installed version
    ///
    /// Kept when the range is missing or unparsable, or when the installed
    /// version is a branch that cannot be compared.
    fn affects(&self, installed_version: &str) -> bool {
        let Some(range) = self
            .affected_versions
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
        else {
            return true;
        };

        if ComposerVersion::parse(installed_version).is_none() {
            return true;
        }

        match VersionConstraint::parse(range) {
            Ok(constraint) => constraint.satisfied_by(installed_version),
            Err(_) => true,
        }
    }
}

/// Maps one batch response onto the packages that were asked about
fn convert_response(batch: &[Package], response: PackagistResponse) -> Vec<PackageAdvisories> {
    let by_package: HashMap<String, Vec<serde_json::Value>> = match response.advisories {
        serde_json::Value::Object(map) => map
            .into_iter()
            .filter_map(|(name, entries)| match entries {
                serde_json::Value::Array(items) => Some((name.to_lowercase(), items)),
                _ => None,
            })
            .collect(),
        _ => HashMap::new(),
    };

    batch
        .iter()
        .filter_map(|package| {
            let entries = by_package.get(package.name())?;

            let advisories: BTreeMap<String, String> = entries
                .iter()
                .filter_map(|entry| {
                    serde_json::from_value::<PackagistAdvisory>(entry.clone()).ok()
                })
                .filter(|advisory| {
                    advisory
                        .package_name
                        .as_deref()
                        .map_or(true, |name| name.eq_ignore_ascii_case(package.name()))
                })
                .filter(|advisory| advisory.affects(package.version()))
                .filter_map(|advisory| {
                    let id = advisory
                        .advisory_id
                        .as_deref()
                        .map(str::trim)
                        .filter(|id| !id.is_empty())?
                        .to_string();
                    let reason = advisory.reason(&id);
                    Some((id, reason))
                })
                .collect();

            if advisories.is_empty() {
                None
            } else {
                Some(PackageAdvisories::new(
                    package.name().to_string(),
                    package.version().to_string(),
                    advisories,
                ))
            }
        })
        .collect()
}
