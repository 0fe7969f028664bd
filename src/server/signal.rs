// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
//
// A second signal while shutting down exits immediately.

use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// Exit status for a forced second-signal exit (128 + SIGINT)
const EXIT_FORCED: i32 = 130;

/// Start signal handlers (Unix)
///
/// Registration happens before this returns, so a failure surfaces at
/// startup instead of inside the background task.
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    logger::log_info(&format!(
        "[SIGNAL] SIGTERM / SIGINT trigger graceful shutdown (pid {})",
        std::process::id()
    ));

    tokio::spawn(async move {
        loop {
            let name = tokio::select! {
                _ = sigterm.recv() => "SIGTERM",
                _ = sigint.recv() => "SIGINT",
            };
            if state.is_shutting_down() {
                logger::log_warning(&format!("[SIGNAL] {name} received again, exiting now"));
                std::process::exit(EXIT_FORCED);
            }
            logger::log_info(&format!("\n[SIGNAL] {name} received, shutting down..."));
            state.request_shutdown();
        }
    });

    Ok(())
}

/// Non-unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(state: Arc<AppState>) -> std::io::Result<()> {
    logger::log_info("[SIGNAL] Ctrl+C triggers graceful shutdown");

    tokio::spawn(async move {
        while let Ok(()) = tokio::signal::ctrl_c().await {
            if state.is_shutting_down() {
                logger::log_warning("[SIGNAL] Ctrl+C received again, exiting now");
                std::process::exit(EXIT_FORCED);
            }
            logger::log_info("\n[SIGNAL] Ctrl+C received, shutting down...");
            state.request_shutdown();
        }
    });

    Ok(())
}
