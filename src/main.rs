//! launchdeck CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use launchdeck::cli::{
    app::{launch_options, load_merged_config, run_interactive, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use launchdeck::domain::config::AppConfig;
use launchdeck::infrastructure::XdgConfigStore;

/// Env var holding the log filter
const LOG_ENV: &str = "LAUNCHDECK_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    let presenter = Presenter::new();

    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args (and LAUNCHDECK_HOME via clap)
    let cli_config = AppConfig {
        base_dir: cli.base_dir.filter(|s| !s.trim().is_empty()),
        poll_interval_ms: cli.poll_interval,
        auto_commit: if cli.no_auto_commit { Some(false) } else { None },
    };

    let config = load_merged_config(cli_config).await;
    run_interactive(launch_options(&config)).await
}
