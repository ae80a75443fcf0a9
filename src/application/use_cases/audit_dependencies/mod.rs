use crate::application::dto::{AuditRequest, AuditResponse};
use crate::composer::ProjectManifest;
use crate::ownership::domain::{
    AdvisoryOutcome, Ownership, Package, PackageAdvisories, PackageGraph,
};
use crate::ownership::policies::BlockingPolicy;
use crate::ownership::services::{OwnershipClassifier, PlatformDetection, PlatformDetector};
use crate::ports::outbound::{
    AdvisoryRepository, LockfileReader, ProgressReporter, ProjectManifestReader,
};
use crate::shared::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;


/// AuditDependenciesUseCase - classifies dependency ownership and triages advisories
///
/// # Type Parameters
/// * `LR` - LockfileReader implementation
/// * `MR` - ProjectManifestReader implementation
/// * `AR` - AdvisoryRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct AuditDependenciesUseCase<LR, MR, AR, PR> {
    lockfile_reader: LR,
    manifest_reader: MR,
    advisory_repository: AR,
    progress_reporter: PR,
    classifier: OwnershipClassifier,
}

impl<LR, MR, AR, PR> AuditDependenciesUseCase<LR, MR, AR, PR>
where
    LR: LockfileReader,
    MR: ProjectManifestReader,
    AR: AdvisoryRepository,
    PR: ProgressReporter,
{
    /// Creates a new AuditDependenciesUseCase with injected dependencies
    pub fn new(
        lockfile_reader: LR,
        manifest_reader: MR,
        advisory_repository: AR,
        progress_reporter: PR,
    ) -> Self {
        Self {
            lockfile_reader,
            manifest_reader,
            advisory_repository,
            progress_reporter,
            classifier: OwnershipClassifier::new(),
        }
    }

    /// Executes the audit
    ///
    /// # Errors
    /// Returns an error if a Composer file is missing or malformed, or a
    /// platform pattern is invalid. Blocking advisories are NOT an error
    /// here: they are part of the response.
    pub async fn execute(&self, request: AuditRequest) -> Result<AuditResponse> {
        // Step 1: Installed graph
        let graph = self.load_graph(&request)?;

        // Step 2: Root project
        let manifest = self
            .manifest_reader
            .read_project_manifest(&request.project_path)?;
        let direct_requires = manifest.direct_requires(request.include_dev);

        // Step 3: Platform roots
        let platform_roots = self.detect_platform_roots(&request, &manifest, &graph)?;

        // Step 4: Roots that are named but not installed
        let missing_platform_roots = self
            .classifier
            .missing_platform_roots(&graph, &platform_roots);
        for root in &missing_platform_roots {
            self.progress_reporter.report_warning(&format!(
                "Platform package '{}' is not installed; it is ignored for classification.",
                root
            ));
        }

        // Step 5: Ownership
        let ownership = self
            .classifier
            .classify(&graph, &platform_roots, &direct_requires);
        self.report_classification(&graph, &ownership);

        // Step 6: Advisories
        let advisory_outcome = if request.check_advisories {
            Some(self.triage_advisories(&request, &graph, &ownership).await?)
        } else {
            None
        };

        let ignore_reasons = request
            .ignored_advisories
            .iter()
            .filter_map(|(id, reason)| reason.clone().map(|reason| (id.clone(), reason)))
            .collect();

        Ok(AuditResponse {
            project_name: manifest.name,
            package_count: graph.len(),
            ownership,
            platform_roots,
            direct_requires,
            missing_platform_roots,
            advisory_outcome,
            ignore_reasons,
        })
    }

    fn load_graph(&self, request: &AuditRequest) -> Result<PackageGraph> {
        self.progress_reporter.report(&format!(
            "📖 Loading composer.lock file from: {}",
            request.project_path.display()
        ));

        let parsed = self
            .lockfile_reader
            .read_and_parse_lockfile(&request.project_path, request.include_dev)?;

        for skipped in &parsed.skipped {
            self.progress_reporter.report_warning(skipped);
        }

        let graph = PackageGraph::from_packages(parsed.packages);
        self.progress_reporter.report(&format!(
            "✅ Detected {} package(s) with {} dependency edge(s)",
            graph.len(),
            graph.edge_count()
        ));

        Ok(graph)
    }

    /// Platform roots from request patterns, composer.json patterns and package types
    ///
    /// Wildcard-free patterns name a root even when it is not installed, so
    /// that a missing platform package is reported rather than silently
    /// dropped.
    fn detect_platform_roots(
        &self,
        request: &AuditRequest,
        manifest: &ProjectManifest,
        graph: &PackageGraph,
    ) -> Result<Vec<String>> {
        let mut patterns: Vec<String> = request.platform_patterns.clone();
        for pattern in &manifest.platform_patterns {
            if !patterns.contains(pattern) {
                patterns.push(pattern.clone());
            }
        }

        let detector = PlatformDetector::new(patterns.clone(), request.platform_types.clone())?;
        if detector.is_empty() {
            self.progress_reporter.report_warning(
                "No platform packages configured; every reachable package is treated as yours. \
                 Use --platform or extra.platform-audit.platform-packages in composer.json.",
            );
        }

        let PlatformDetection {
            roots,
            unmatched_patterns,
        } = detector.detect(graph);

        for pattern in unmatched_patterns.iter().filter(|p| p.contains('*')) {
            self.progress_reporter.report_warning(&format!(
                "Platform pattern '{}' did not match any installed package.",
                pattern
            ));
        }

        let mut roots = roots;
        roots.extend(
            patterns
                .iter()
                .filter(|p| !p.contains('*'))
                .map(|p| p.to_lowercase()),
        );
        roots.sort();
        roots.dedup();

        let installed = roots.iter().filter(|r| graph.contains(r)).count();
        self.progress_reporter
            .report(&format!("🏗️  Identified {} platform package(s)", installed));

        Ok(roots)
    }

    fn report_classification(&self, graph: &PackageGraph, ownership: &BTreeMap<String, Ownership>) {
        let summary = Ownership::ALL
            .iter()
            .map(|label| {
                let count = ownership.values().filter(|o| *o == label).count();
                format!("{} {}", count, label)
            })
            .collect::<Vec<_>>()
            .join(", ");

        self.progress_reporter
            .report(&format!("🔎 Classified packages: {}", summary));

        let unclassified = graph.len().saturating_sub(ownership.len());
        if unclassified > 0 {
            self.progress_reporter.report(&format!(
                "   {} package(s) are not reachable from any root",
                unclassified
            ));
        }
    }

    async fn triage_advisories(
        &self,
        request: &AuditRequest,
        graph: &PackageGraph,
        ownership: &BTreeMap<String, Ownership>,
    ) -> Result<AdvisoryOutcome> {
        let mut packages: Vec<Package> = graph.packages().cloned().collect();
        packages.sort_by(|a, b| a.name().cmp(b.name()));

        self.progress_reporter.report(&format!(
            "🛡️  Checking {} package(s) for security advisories...",
            packages.len()
        ));

        let package_advisories = self.fetch_with_progress(packages).await?;
        let outcome =
            BlockingPolicy::evaluate(ownership, &package_advisories, &request.ignored_ids());

        self.progress_reporter.report_completion(&format!(
            "✅ Advisories: {} blocking, {} accepted (platform-only), {} ignored",
            outcome.blocking.len(),
            outcome.accepted.len(),
            outcome.ignored.len()
        ));

        Ok(outcome)
    }

    /// Fetches advisories, forwarding finished batches to the progress reporter
    ///
    /// The repository callback must be `Send`, so it only records counts;
    /// the reporter is polled from this task on a short interval.
    async fn fetch_with_progress(&self, packages: Vec<Package>) -> Result<Vec<PackageAdvisories>> {
        const MESSAGE: &str = "Querying advisory database...";

        let progress_current = Arc::new(AtomicUsize::new(0));
        let progress_total = Arc::new(AtomicUsize::new(0));
        let current_clone = progress_current.clone();
        let total_clone = progress_total.clone();

        let fetch = self.advisory_repository.fetch_advisories(
            packages,
            Box::new(move |current: usize, total: usize| {
                current_clone.store(current, Ordering::Relaxed);
                total_clone.store(total, Ordering::Relaxed);
            }),
        );
        tokio::pin!(fetch);

        let mut ticker = tokio::time::interval(Duration::from_millis(50));
        let mut last_reported = None;
        let report = |last: &mut Option<(usize, usize)>| {
            let progress = (
                progress_current.load(Ordering::Relaxed),
                progress_total.load(Ordering::Relaxed),
            );
            if progress.1 > 0 && *last != Some(progress) {
                self.progress_reporter
                    .report_progress(progress.0, progress.1, Some(MESSAGE));
                *last = Some(progress);
            }
        };

        let result = loop {
            tokio::select! {
                result = &mut fetch => break result,
                _ = ticker.tick() => report(&mut last_reported),
            }
        };
        report(&mut last_reported);

        result
    }
}
