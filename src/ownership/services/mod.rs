mod ownership_classifier;
mod platform_detector;
mod reachability;

pub use ownership_classifier::OwnershipClassifier;
pub use platform_detector::{PlatformDetection, PlatformDetector};
pub use reachability::{is_namespaced_package, ReachabilityWalker};
