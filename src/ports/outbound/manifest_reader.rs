use crate::composer::{parse_manifest, ProjectManifest};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::path::Path;

/// ProjectManifestReader port for reading composer.json
pub trait ProjectManifestReader {
    /// Reads composer.json from the specified project directory
    ///
    /// # Errors
    /// Returns an error if the manifest does not exist or cannot be read
    fn read_manifest(&self, project_path: &Path) -> Result<String>;

    /// Reads and parses composer.json
    fn read_project_manifest(&self, project_path: &Path) -> Result<ProjectManifest> {
        let content = self.read_manifest(project_path)?;

        parse_manifest(&content).map_err(|e| {
            AuditError::ManifestParseError {
                path: project_path.join(crate::composer::MANIFEST_NAME),
                details: format!("{:#}", e),
            }
            .into()
        })
    }
}
