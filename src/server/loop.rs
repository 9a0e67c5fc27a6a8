// Server loop module
// Accepts connections until a shutdown signal arrives, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);
const DRAIN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Accept loop for the server.
///
/// Runs until the shutdown notification fires, then stops accepting and
/// waits up to a short grace period for in-flight connections to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown_started(active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    // Stop accepting, then let in-flight connections finish
    drop(listener);

    let drain_deadline = tokio::time::Instant::now() + DRAIN_GRACE_PERIOD;
    while active_connections.load(Ordering::SeqCst) > 0
        && tokio::time::Instant::now() < drain_deadline
    {
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }

    let remaining = active_connections.load(Ordering::SeqCst);
    if remaining > 0 {
        logger::log_warning(&format!(
            "{remaining} connections still open after {}s grace period",
            DRAIN_GRACE_PERIOD.as_secs()
        ));
    }
    logger::log_shutdown_complete();

    Ok(())
}
