use crate::ownership::domain::{Package, PackageAdvisories};
use crate::shared::Result;
use async_trait::async_trait;

/// Callback receiving `(completed, total)` request counts
pub type ProgressCallback<'a> = Box<dyn Fn(usize, usize) + Send + Sync + 'a>;

/// AdvisoryRepository port for fetching known security advisories
///
/// Implementations must be `Send + Sync` so requests can be issued
/// concurrently from the async runtime.
#[async_trait]
pub trait AdvisoryRepository: Send + Sync {
    /// Fetches advisories affecting the given installed packages
    ///
    /// Only packages with at least one advisory that applies to their
    /// installed version appear in the result.
    ///
    /// # Errors
    /// Implementations decide whether a failed request is fatal. The
    /// Packagist adapter degrades to "no advisories" for that batch and
    /// warns instead.
    async fn fetch_advisories(
        &self,
        packages: Vec<Package>,
        progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageAdvisories>>;
}
