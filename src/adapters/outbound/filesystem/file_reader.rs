use crate::composer::{LOCKFILE_NAME, MANIFEST_NAME};
use crate::ports::outbound::{LockfileReader, ProjectManifestReader};
use crate::shared::error::AuditError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading Composer files from disk
///
/// Implements both LockfileReader and ProjectManifestReader. Every read goes
/// through [`read_regular_file`], which rejects symlinks and oversized files.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn read_project_file(&self, path: &Path, file_name: &str) -> Result<String> {
        read_regular_file(path, file_name).map_err(|e| {
            AuditError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileReader for FileSystemReader {
    fn read_lockfile(&self, project_path: &Path) -> Result<String> {
        let lockfile_path = project_path.join(LOCKFILE_NAME);

        if !lockfile_path.exists() {
            return Err(AuditError::LockfileNotFound {
                path: lockfile_path,
                suggestion: format!(
                    "composer.lock file does not exist in project directory \"{}\".\n   \
                     Run `composer install` or `composer update --lock` first, or specify the correct path with the --path option.",
                    project_path.display()
                ),
            }
            .into());
        }

        self.read_project_file(&lockfile_path, LOCKFILE_NAME)
    }
}

impl ProjectManifestReader for FileSystemReader {
    fn read_manifest(&self, project_path: &Path) -> Result<String> {
        let manifest_path = project_path.join(MANIFEST_NAME);

        if !manifest_path.exists() {
            return Err(AuditError::ManifestNotFound {
                path: manifest_path,
            }
            .into());
        }

        self.read_project_file(&manifest_path, MANIFEST_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_lockfile_success() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("composer.lock"), "test content").unwrap();

        let reader = FileSystemReader::new();
        let content = reader.read_lockfile(temp_dir.path()).unwrap();

        assert_eq!(content, "test content");
    }

    #[test]
    fn test_read_lockfile_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_lockfile(temp_dir.path()).unwrap_err();

        assert!(err.to_string().contains("composer.lock file does not exist"));
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::LockfileNotFound { .. })
        ));
    }

    #[test]
    fn test_read_lockfile_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("composer.lock")).unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_lockfile(temp_dir.path()).unwrap_err();

        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_read_and_parse_lockfile() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("composer.lock"),
            r#"{"packages": [{"name": "psr/log", "version": "3.0.0"}]}"#,
        )
        .unwrap();

        let reader = FileSystemReader::new();
        let parsed = reader
            .read_and_parse_lockfile(temp_dir.path(), false)
            .unwrap();

        assert_eq!(parsed.packages.len(), 1);
    }

    #[test]
    fn test_read_and_parse_lockfile_invalid() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("composer.lock"), "{ nope").unwrap();

        let reader = FileSystemReader::new();
        let err = reader
            .read_and_parse_lockfile(temp_dir.path(), false)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::LockfileParseError { .. })
        ));
    }

    #[test]
    fn test_read_manifest_success() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("composer.json"),
            r#"{"name": "acme/site", "require": {"drupal/core": "^10"}}"#,
        )
        .unwrap();

        let reader = FileSystemReader::new();
        let manifest = reader.read_project_manifest(temp_dir.path()).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("acme/site"));
        assert_eq!(manifest.direct_requires(false), vec!["drupal/core"]);
    }

    #[test]
    fn test_read_manifest_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_manifest(temp_dir.path()).unwrap_err();

        assert!(err.to_string().contains("composer.json file not found"));
    }

    #[test]
    fn test_read_manifest_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("composer.json"), "[[[").unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_project_manifest(temp_dir.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse composer.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_lockfile_symlink_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.lock");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("composer.lock")).unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_lockfile(temp_dir.path()).unwrap_err();

        assert!(err.to_string().contains("symbolic link"));
    }
}
