use crate::ownership::domain::{AdvisoryOutcome, Ownership, PackageAdvisories, TriagedAdvisory};
use std::collections::{BTreeMap, BTreeSet};

/// BlockingPolicy decides, per advisory, whether it halts the operation
///
/// Rules, in order:
/// 1. An advisory whose id the caller explicitly ignores never blocks.
/// 2. An advisory on a package whose ownership does not block
///    (`PlatformOnly`) is accepted risk.
/// 3. Everything else blocks, including advisories on packages that have
///    no ownership label at all.
pub struct BlockingPolicy;

impl BlockingPolicy {
    /// Partitions every advisory into blocking, accepted and ignored
    ///
    /// # Arguments
    /// * `ownership` - Classifier output (package name to ownership)
    /// * `package_advisories` - Advisories known for installed packages
    /// * `ignored_ids` - Advisory identifiers the caller accepts explicitly
    pub fn evaluate(
        ownership: &BTreeMap<String, Ownership>,
        package_advisories: &[PackageAdvisories],
        ignored_ids: &BTreeSet<String>,
    ) -> AdvisoryOutcome {
        let mut outcome = AdvisoryOutcome::default();

        for package in package_advisories {
            let label = ownership.get(package.package_name()).copied();

            for (id, reason) in package.advisories() {
                let triaged = TriagedAdvisory {
                    id: id.clone(),
                    package_name: package.package_name().to_string(),
                    version: package.version().to_string(),
                    reason: reason.clone(),
                    ownership: label,
                };

                if ignored_ids.contains(id) {
                    outcome.ignored.push(triaged);
                } else if Self::blocks(label) {
                    outcome.blocking.push(triaged);
                } else {
                    outcome.accepted.push(triaged);
                }
            }
        }

        for bucket in [
            &mut outcome.blocking,
            &mut outcome.accepted,
            &mut outcome.ignored,
        ] {
            bucket.sort_by(|a, b| (&a.package_name, &a.id).cmp(&(&b.package_name, &b.id)));
        }

        outcome
    }

    fn blocks(ownership: Option<Ownership>) -> bool {
        ownership.map_or(true, Ownership::should_block)
    }
}
