//! Configuration storage adapters

mod xdg;

pub use xdg::{default_base_dir, XdgConfigStore, APP_DIR_NAME};
