use platform_audit::prelude::*;
use std::path::Path;

/// Mock ProjectManifestReader returning a fixed composer.json
pub struct MockManifestReader {
    pub content: String,
}

impl MockManifestReader {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}

impl ProjectManifestReader for MockManifestReader {
    fn read_manifest(&self, _project_path: &Path) -> Result<String> {
        Ok(self.content.clone())
    }
}
