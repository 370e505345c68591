//! launchdeck - interactive project launcher
//!
//! Keeps lists of projects, launch commands and categorized files in plain
//! quoted-field text files, offers them through terminal menus, and
//! auto-commits changes to files and folders opened from those menus.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Records, the menu state machine values, config and errors
//! - **Application**: Port interfaces (traits) and the auto-commit use case
//! - **Infrastructure**: Record storage, change watching, and adapters (git, shell, opener, prompts)
//! - **CLI**: Argument parsing, menu navigator, presenter, and the session runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
