//! Process launching adapters

mod opener;
mod shell;

pub use opener::SystemOpener;
pub use shell::ShellExecutor;
