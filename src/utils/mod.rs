pub mod command;
pub mod mirror;

// Trait-based abstraction for testability
pub mod executor;

// Re-export commonly used types and traits (used by test crate)
pub use executor::{MirrorExecutor, RealExecutor};
pub use mirror::{describe_exit_code, MirrorError, MirrorResult, MirrorRunner};
