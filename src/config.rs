//! Configuration file support for platform-audit.
//!
//! Provides YAML-based configuration through `platform-audit.config.yml`
//! files, including data structures, file loading, validation and merging
//! with command-line arguments.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::application::dto::{AuditRequest, OutputFormat};
use crate::cli::Args;
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "platform-audit.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub platform_packages: Option<Vec<String>>,
    pub platform_types: Option<Vec<String>>,
    pub include_dev: Option<bool>,
    pub check_advisories: Option<bool>,
    pub ignore_advisories: Option<Vec<IgnoreAdvisory>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// An advisory the project accepts explicitly.
#[derive(Debug, Deserialize)]
pub struct IgnoreAdvisory {
    pub id: String,
    pub reason: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref ignore_advisories) = config.ignore_advisories {
        for (i, entry) in ignore_advisories.iter().enumerate() {
            if entry.id.trim().is_empty() {
                bail!(
                    "Invalid config: ignore_advisories[{}].id must not be empty.\n\n\
                     💡 Hint: Each ignore_advisories entry must have a non-empty 'id' field (e.g., \"PKSA-n7bn-3mfg-sqw6\").",
                    i
                );
            }
        }
    }

    if let Some(ref format) = config.format {
        format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

/// Settings after combining command-line arguments with the config file.
#[derive(Debug)]
pub struct MergedConfig {
    pub format: OutputFormat,
    pub request: AuditRequest,
}

/// Merge CLI arguments over the config file.
///
/// Scalars: CLI wins, then config, then defaults. Pattern, type and ignore
/// lists from both sources are combined; a CLI ignore without a reason does
/// not erase a reason given in the config.
pub fn merge_config(args: &Args, config: Option<ConfigFile>) -> Result<MergedConfig> {
    let config = config.unwrap_or_default();

    let format = match (args.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(format)) => format.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        (None, None) => OutputFormat::default(),
    };

    let include_dev = !args.no_dev && config.include_dev.unwrap_or(true);
    let check_advisories = !args.no_advisories && config.check_advisories.unwrap_or(true);

    let platform_patterns = merge_lists(config.platform_packages, &args.platform);
    let platform_types = merge_lists(config.platform_types, &args.platform_type);

    let mut ignored: BTreeMap<String, Option<String>> = BTreeMap::new();
    for entry in config.ignore_advisories.unwrap_or_default() {
        ignored.insert(entry.id.trim().to_string(), entry.reason);
    }
    for id in &args.ignore {
        let id = id.trim();
        if id.is_empty() {
            bail!("--ignore requires a non-empty advisory id");
        }
        ignored.entry(id.to_string()).or_insert(None);
    }

    let request = ignored.into_iter().fold(
        AuditRequest::builder()
            .project_path(args.project_path())
            .platform_patterns(platform_patterns)
            .platform_types(platform_types)
            .include_dev(include_dev)
            .check_advisories(check_advisories),
        |builder, (id, reason)| builder.ignore_advisory(id, reason),
    );

    Ok(MergedConfig {
        format,
        request: request.build(),
    })
}

fn merge_lists(from_config: Option<Vec<String>>, from_cli: &[String]) -> Vec<String> {
    let mut merged = from_config.unwrap_or_default();
    for item in from_cli {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["platform-audit"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
platform_packages:
  - drupal/core*
platform_types:
  - drupal-core
include_dev: false
check_advisories: true
ignore_advisories:
  - id: PKSA-1111-2222-3333
    reason: "Module is disabled on production"
  - id: PKSA-4444-5555-6666
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(
            config.platform_packages.as_deref(),
            Some(&["drupal/core*".to_string()][..])
        );
        assert_eq!(
            config.platform_types.as_deref(),
            Some(&["drupal-core".to_string()][..])
        );
        assert_eq!(config.include_dev, Some(false));
        assert_eq!(config.check_advisories, Some(true));
        let ignores = config.ignore_advisories.unwrap();
        assert_eq!(ignores.len(), 2);
        assert_eq!(ignores[0].id, "PKSA-1111-2222-3333");
        assert_eq!(
            ignores[0].reason.as_deref(),
            Some("Module is disabled on production")
        );
        assert!(ignores[1].reason.is_none());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "format: text\ncheck_advisories: false\n",
        )
        .unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("text"));
        assert_eq!(config.check_advisories, Some(false));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_advisory_id_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            "ignore_advisories:\n  - id: \"   \"\n    reason: \"whitespace only\"\n",
        )
        .unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_invalid_format_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: markdown\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            "format: json\nunknown_field: true\ncheck_cve: yes\n",
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("check_cve"));
    }

    #[test]
    fn test_merge_defaults() {
        let merged = merge_config(&args(&[]), None).unwrap();

        assert_eq!(merged.format, OutputFormat::Text);
        assert_eq!(merged.request.project_path, PathBuf::from("."));
        assert!(merged.request.include_dev);
        assert!(merged.request.check_advisories);
        assert!(merged.request.platform_patterns.is_empty());
    }

    #[test]
    fn test_merge_config_values_apply() {
        let config = ConfigFile {
            format: Some("json".to_string()),
            include_dev: Some(false),
            check_advisories: Some(false),
            platform_packages: Some(vec!["drupal/core".to_string()]),
            ..Default::default()
        };

        let merged = merge_config(&args(&[]), Some(config)).unwrap();

        assert_eq!(merged.format, OutputFormat::Json);
        assert!(!merged.request.include_dev);
        assert!(!merged.request.check_advisories);
        assert_eq!(merged.request.platform_patterns, vec!["drupal/core"]);
    }

    #[test]
    fn test_merge_cli_overrides_config() {
        let config = ConfigFile {
            format: Some("json".to_string()),
            check_advisories: Some(true),
            ..Default::default()
        };

        let merged = merge_config(&args(&["-f", "text", "--no-advisories"]), Some(config)).unwrap();

        assert_eq!(merged.format, OutputFormat::Text);
        assert!(!merged.request.check_advisories);
    }

    #[test]
    fn test_merge_combines_lists() {
        let config = ConfigFile {
            platform_packages: Some(vec!["drupal/core".to_string()]),
            platform_types: Some(vec!["drupal-core".to_string()]),
            ignore_advisories: Some(vec![IgnoreAdvisory {
                id: "PKSA-a".to_string(),
                reason: Some("accepted by security team".to_string()),
            }]),
            ..Default::default()
        };

        let merged = merge_config(
            &args(&[
                "-P",
                "drupal/core",
                "-P",
                "symfony/*",
                "--platform-type",
                "drupal-profile",
                "-i",
                "PKSA-a",
                "-i",
                "PKSA-b",
            ]),
            Some(config),
        )
        .unwrap();

        assert_eq!(
            merged.request.platform_patterns,
            vec!["drupal/core", "symfony/*"]
        );
        assert_eq!(
            merged.request.platform_types,
            vec!["drupal-core", "drupal-profile"]
        );
        assert_eq!(
            merged.request.ignored_advisories.get("PKSA-a"),
            Some(&Some("accepted by security team".to_string()))
        );
        assert_eq!(merged.request.ignored_advisories.get("PKSA-b"), Some(&None));
    }

    #[test]
    fn test_merge_rejects_empty_cli_ignore() {
        let err = merge_config(&args(&["-i", " "]), None).unwrap_err();
        assert!(err.to_string().contains("non-empty advisory id"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.format.is_none());
        assert!(config.platform_packages.is_none());
        assert!(config.ignore_advisories.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
