// Server loop module
// Accepts connections until shutdown, then lets in-flight requests finish

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept loop. Must run inside a `LocalSet`; returns after shutdown is
/// requested and in-flight connections have drained (or the grace period ran out).
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    // Created before the first flag check so a notify in between is not lost
    let shutdown = state.shutdown.notified();
    tokio::pin!(shutdown);

    if !state.is_shutting_down() {
        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                        Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                    }
                }

                () = &mut shutdown => break,
            }
        }
    }

    drop(listener);
    logger::log_shutdown(state.active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(std::cmp::max(
        state.config.performance.read_timeout,
        state.config.performance.write_timeout,
    ));
    drain_connections(&state, grace).await;
}

/// Wait until no connection is active or `grace` has elapsed
async fn drain_connections(state: &AppState, grace: Duration) {
    let deadline = tokio::time::Instant::now() + grace;

    while state.active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Grace period of {}s elapsed with {} connection(s) still open",
                grace.as_secs(),
                state.active_connections.load(Ordering::SeqCst)
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
