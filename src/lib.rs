//! platform-audit - dependency ownership audit for Composer projects
//!
//! This library classifies every package installed from a `composer.lock`
//! by who is accountable for it: the project itself, the platform it is
//! built on (e.g. Drupal core), or both. Security advisories are then
//! triaged so that only those affecting packages the project owns block
//! an install.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`ownership`): Package graph, classification and blocking policy
//! - **Composer** (`composer`): Parsers for `composer.lock` and `composer.json`
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use platform_audit::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let lockfile_reader = FileSystemReader::new();
//! let manifest_reader = FileSystemReader::new();
//! let advisory_repository = PackagistAdvisoryClient::new()?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = AuditDependenciesUseCase::new(
//!     lockfile_reader,
//!     manifest_reader,
//!     advisory_repository,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = AuditRequest::builder()
//!     .project_path(".")
//!     .platform_patterns(vec!["drupal/core".to_string()])
//!     .build();
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let output = TextReportFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod composer;
pub mod config;
pub mod ownership;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonReportFormatter, TextReportFormatter};
    pub use crate::adapters::outbound::network::PackagistAdvisoryClient;
    pub use crate::application::dto::{AuditRequest, AuditResponse, OutputFormat};
    pub use crate::application::use_cases::AuditDependenciesUseCase;
    pub use crate::composer::{LockfileParseResult, ProjectManifest};
    pub use crate::ownership::domain::{
        AdvisoryOutcome, Ownership, Package, PackageAdvisories, PackageGraph, TriagedAdvisory,
    };
    pub use crate::ownership::policies::BlockingPolicy;
    pub use crate::ownership::services::{OwnershipClassifier, PlatformDetector};
    pub use crate::ports::outbound::{
        AdvisoryRepository, LockfileReader, OutputPresenter, ProgressCallback, ProgressReporter,
        ProjectManifestReader, ReportFormatter,
    };
    pub use crate::shared::error::{AuditError, ExitCode};
    pub use crate::shared::Result;
}
