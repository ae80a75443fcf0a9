/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod advisory_repository;
pub mod formatter;
pub mod lockfile_reader;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;

pub use advisory_repository::{AdvisoryRepository, ProgressCallback};
pub use formatter::ReportFormatter;
pub use lockfile_reader::LockfileReader;
pub use manifest_reader::ProjectManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
