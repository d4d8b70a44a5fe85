// Signal handling module
//
// Supported signals:
// - SIGTERM: Stop serving
// - SIGINT:  Stop serving (Ctrl+C)
//
// The first signal wins; in-flight requests are not drained.

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the signal listener (Unix)
///
/// Spawns a background task that waits for SIGINT or SIGTERM once and then
/// notifies `shutdown`.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
        // notify_one keeps a permit if the loop is between polls
        shutdown.notify_one();
    });

    Ok(())
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use crate::logger;

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.notify_one(),
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });

    Ok(())
}
