use crate::composer::{parse_lockfile, LockfileParseResult};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::path::Path;

/// LockfileReader port for reading composer.lock
///
/// Implementations only provide the raw file content; parsing into domain
/// packages is shared by every implementation.
pub trait LockfileReader {
    /// Reads composer.lock from the specified project directory
    ///
    /// # Errors
    /// Returns an error if:
    /// - composer.lock does not exist
    /// - The file cannot be read due to permissions or I/O errors
    fn read_lockfile(&self, project_path: &Path) -> Result<String>;

    /// Reads and parses composer.lock into packages
    ///
    /// # Arguments
    /// * `project_path` - Path to the project directory
    /// * `include_dev` - Whether `packages-dev` are part of the installed graph
    fn read_and_parse_lockfile(
        &self,
        project_path: &Path,
        include_dev: bool,
    ) -> Result<LockfileParseResult> {
        let content = self.read_lockfile(project_path)?;

        parse_lockfile(&content, include_dev).map_err(|e| {
            AuditError::LockfileParseError {
                path: project_path.join(crate::composer::LOCKFILE_NAME),
                details: format!("{:#}", e),
            }
            .into()
        })
    }
}
