//! Interactive session runner

use std::process::ExitCode;
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::CommitPipeline;
use crate::domain::config::AppConfig;
use crate::domain::SessionEnd;
use crate::infrastructure::storage::Catalog;
use crate::infrastructure::watch::ChangeWatcher;
use crate::infrastructure::{
    default_base_dir, GitCli, InquirePrompt, ShellExecutor, SystemOpener, XdgConfigStore,
};

use super::args::LaunchOptions;
use super::commit_worker::spawn_commit_worker;
use super::navigator::MenuNavigator;
use super::presenter::Presenter;
use super::signals::wait_for_shutdown;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Run the interactive menu until the user exits.
///
/// When the menu goes idle with watches active, keep auto-committing until
/// Ctrl+C.
pub async fn run_interactive(options: LaunchOptions) -> ExitCode {
    let presenter = Presenter::new();
    debug!(?options, "starting interactive session");

    let catalog = match Catalog::open(&options.base_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            presenter.error(&format!("Failed to open {}: {}", options.base_dir.display(), e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let pipeline = options
        .auto_commit
        .then(|| CommitPipeline::new(GitCli::new()));
    let (on_change, worker) = spawn_commit_worker(pipeline, presenter);
    let watcher = Arc::new(ChangeWatcher::new(options.poll_interval));

    let navigator = MenuNavigator::new(
        InquirePrompt::new(),
        ShellExecutor::new(),
        SystemOpener::new(),
        catalog,
        Arc::clone(&watcher),
        on_change,
    );

    let end = navigator.run().await;
    debug!(?end, "menu loop finished");

    let mut exit = ExitCode::from(EXIT_SUCCESS);
    if end == SessionEnd::Idle {
        let active = watcher.active_count().await;
        if active > 0 {
            presenter.info(&format!(
                "Watching {} path{} for changes. Press Ctrl+C to quit.",
                active,
                if active == 1 { "" } else { "s" }
            ));
            match wait_for_shutdown().await {
                Ok(signal) => debug!(?signal, "shutting down"),
                Err(e) => {
                    presenter.error(&format!("Failed to wait for Ctrl+C: {}", e));
                    exit = ExitCode::from(EXIT_ERROR);
                }
            }
        }
    }

    worker.abort();
    exit
}

/// Load and merge configuration from file and CLI/env overrides
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    // defaults < file < env/cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Turn a merged config into session options
pub fn launch_options(config: &AppConfig) -> LaunchOptions {
    LaunchOptions {
        base_dir: config.base_dir_or_else(default_base_dir),
        poll_interval: config.poll_interval_or_default(),
        auto_commit: config.auto_commit_or_default(),
    }
}
