//! Shutdown signal handling for the idle phase

use std::io;

/// Why the idle wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Ctrl+C
    Interrupt,
    /// SIGTERM (Unix only)
    Terminate,
}

/// Wait for Ctrl+C, or SIGTERM on Unix.
#[cfg(unix)]
pub async fn wait_for_shutdown() -> Result<ShutdownSignal, io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| ShutdownSignal::Interrupt),
        _ = sigterm.recv() => Ok(ShutdownSignal::Terminate),
    }
}

/// Wait for Ctrl+C.
#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> Result<ShutdownSignal, io::Error> {
    tokio::signal::ctrl_c().await?;
    Ok(ShutdownSignal::Interrupt)
}
