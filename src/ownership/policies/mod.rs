mod blocking_policy;

pub use blocking_policy::BlockingPolicy;
