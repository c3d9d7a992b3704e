//! Process-wide shutdown state.
//!
//! Ctrl+C must reach the blocking HTTP loop and the actor thread, neither of
//! which the signal handler can own. Nothing else lives here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crossbeam::channel::Sender;
use tiny_http::Server;

/// Set once Ctrl+C was received.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// The running preview server, if any.
static PREVIEW: OnceLock<Preview> = OnceLock::new();

struct Preview {
    server: Arc<Server>,
    actors: Sender<()>,
}

/// Install the Ctrl+C handler. Call once, first thing in `main`.
///
/// Without a registered preview server (a plain `build`, or the initial
/// build of `watch`) the process exits right away with status 130.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if !request_shutdown() {
            std::process::exit(130);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Mark shutdown and wake the preview server. Returns `false` when there is
/// no server to stop.
fn request_shutdown() -> bool {
    SHUTDOWN.store(true, Ordering::SeqCst);

    let Some(preview) = PREVIEW.get() else {
        return false;
    };
    crate::log!("serve"; "shutting down...");
    let _ = preview.actors.send(());
    preview.server.unblock();
    true
}

/// Make the preview server reachable from the Ctrl+C handler.
///
/// Only the first registration counts.
pub fn register_server(server: Arc<Server>, actors: Sender<()>) {
    let _ = PREVIEW.set(Preview { server, actors });
}

pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_shutdown_initially() {
        assert!(!is_shutdown());
    }
}
