use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for a Composer package name (`vendor/package`)
///
/// Names are stored lowercase; Composer treats them case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
        {
            anyhow::bail!(
                "Package name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, dots, and slashes are allowed.",
                name
            );
        }

        Ok(Self(name.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for an installed (locked) version string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        // dev branches may contain slashes (dev-feature/foo)
        if !version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '_' | '/'))
        {
            anyhow::bail!(
                "Package version '{}' contains invalid characters.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A requirement edge: the target name and its (opaque) constraint
///
/// Targets are kept as raw lowercase strings because they may name
/// platform requirements such as `php` or `ext-json` that are never installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    target: String,
    constraint: String,
}

impl Requirement {
    pub fn new(target: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            target: target.into().to_lowercase(),
            constraint: constraint.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn constraint(&self) -> &str {
        &self.constraint
    }
}

/// Package entity representing one locked package and its requirements
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: PackageName,
    version: Version,
    package_type: String,
    requires: Vec<Requirement>,
}

impl Package {
    pub fn new(name: String, version: String) -> Result<Self> {
        Ok(Self {
            name: PackageName::new(name)?,
            version: Version::new(version)?,
            package_type: "library".to_string(),
            requires: Vec::new(),
        })
    }

    /// Sets the Composer package type (e.g. `drupal-core`)
    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = package_type.into();
        self
    }

    /// Appends a requirement edge, preserving declaration order
    pub fn with_requirement(mut self, target: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.requires.push(Requirement::new(target, constraint));
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn requires(&self) -> &[Requirement] {
        &self.requires
    }
}
