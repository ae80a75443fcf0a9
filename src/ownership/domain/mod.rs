pub mod advisory;
pub mod ownership;
pub mod package;
pub mod package_graph;
pub mod version_constraint;

pub use advisory::{AdvisoryOutcome, PackageAdvisories, TriagedAdvisory};
pub use ownership::Ownership;
pub use package::{Package, PackageName, Requirement, Version};
pub use package_graph::PackageGraph;
pub use version_constraint::{ComposerVersion, VersionConstraint};
