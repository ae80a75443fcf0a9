use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;

/// Classify Composer dependencies by ownership and gate installs on advisories
/// that affect packages you maintain
#[derive(Parser, Debug)]
#[command(name = "platform-audit")]
#[command(version)]
#[command(
    about = "Classify Composer dependencies by ownership and gate installs on advisories that affect packages you maintain",
    long_about = None
)]
pub struct Args {
    /// Output format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Platform package pattern (supports wildcards: *)
    /// Can be specified multiple times: -P "drupal/core" -P "drupal/core-*"
    #[arg(short = 'P', long = "platform", value_name = "PATTERN")]
    pub platform: Vec<String>,

    /// Composer package type that marks a platform package (e.g. drupal-core)
    #[arg(long = "platform-type", value_name = "TYPE")]
    pub platform_type: Vec<String>,

    /// Leave packages-dev and require-dev out of the audit
    #[arg(long)]
    pub no_dev: bool,

    /// Skip the security advisory lookup (classification only)
    #[arg(long)]
    pub no_advisories: bool,

    /// Advisory ID to accept without blocking
    /// Can be specified multiple times: -i PKSA-xxxx -i PKSA-yyyy
    #[arg(short, long = "ignore", value_name = "ID")]
    pub ignore: Vec<String>,

    /// Path to a config file (defaults to platform-audit.config.yml in the project directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,
}

impl Args {
    pub fn project_path(&self) -> PathBuf {
        PathBuf::from(self.path.as_deref().unwrap_or("."))
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.as_ref().map(PathBuf::from)
    }
}
