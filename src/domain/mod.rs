//! Domain layer - Core business logic
//!
//! Contains records, value objects, the menu state machine and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod elapsed;
pub mod error;
pub mod navigation;
pub mod record;

// Re-export common types
pub use config::AppConfig;
pub use elapsed::Elapsed;
pub use error::*;
pub use navigation::{Menu, SessionEnd, Transition};
pub use record::{CategoryIndex, CategoryItemRecord, CommandRecord, ProjectEntry, ProjectRecord};
