/// Shared kernel: error types, the crate-wide Result alias and
/// filesystem safety checks used by several adapters.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
