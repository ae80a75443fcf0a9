use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI pipelines rely on these to tell a blocked install apart from a
/// broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// No advisory blocks the operation
    Success = 0,
    /// At least one advisory affects a package the user is accountable for
    BlockingAdvisories = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (I/O, parse failure, invalid configuration, ...)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error returned by the application
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<AuditError>() {
            Some(AuditError::BlockingAdvisories { .. }) => ExitCode::BlockingAdvisories,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::BlockingAdvisories => write!(f, "Blocking Advisories (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the ownership audit.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("composer.lock file not found: {path}\n\n💡 Hint: {suggestion}")]
    LockfileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse composer.lock file: {path}\nDetails: {details}\n\n💡 Hint: Run `composer update --lock` to regenerate the lock file")]
    LockfileParseError { path: PathBuf, details: String },

    #[error("composer.json file not found: {path}\n\n💡 Hint: Please run in the root directory of a Composer project, or specify the correct path with the --path option")]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse composer.json file: {path}\nDetails: {details}\n\n💡 Hint: Run `composer validate` to locate the problem")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{count} security advisory(ies) affect packages you are responsible for: {}\n\n💡 Hint: Update the affected packages, or accept the risk explicitly with --ignore <ID>", .ids.join(", "))]
    BlockingAdvisories { count: usize, ids: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::BlockingAdvisories.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::BlockingAdvisories),
            "Blocking Advisories (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_exit_code_for_blocking_error() {
        let err: anyhow::Error = AuditError::BlockingAdvisories {
            count: 1,
            ids: vec!["PKSA-abcd".to_string()],
        }
        .into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::BlockingAdvisories);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let err: anyhow::Error = AuditError::Validation {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ApplicationError);

        let plain = anyhow::anyhow!("something else");
        assert_eq!(ExitCode::for_error(&plain), ExitCode::ApplicationError);
    }

    #[test]
    fn test_blocking_advisories_display() {
        let error = AuditError::BlockingAdvisories {
            count: 2,
            ids: vec!["PKSA-1".to_string(), "PKSA-2".to_string()],
        };
        let display = format!("{}", error);
        assert!(display.starts_with("2 security advisory(ies)"));
        assert!(display.contains("PKSA-1, PKSA-2"));
        assert!(display.contains("--ignore"));
    }

    #[test]
    fn test_lockfile_not_found_display() {
        let error = AuditError::LockfileNotFound {
            path: PathBuf::from("/test/project/composer.lock"),
            suggestion: "Run composer install".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("composer.lock file not found"));
        assert!(display.contains("/test/project/composer.lock"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Run composer install"));
    }

    #[test]
    fn test_manifest_parse_error_display() {
        let error = AuditError::ManifestParseError {
            path: PathBuf::from("/test/composer.json"),
            details: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse composer.json"));
        assert!(display.contains("expected value at line 1"));
    }

    #[test]
    fn test_security_error_display() {
        let error = AuditError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
