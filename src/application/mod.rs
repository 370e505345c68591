//! Application layer - Use cases and port interfaces
//!
//! Contains the auto-commit use case and the trait definitions
//! for external system interactions.

pub mod commit;
pub mod ports;

// Re-export use cases
pub use commit::{commit_message, CommitOutcome, CommitPipeline};
