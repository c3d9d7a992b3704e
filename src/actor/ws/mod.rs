//! WebSocket Actor - Reload Broadcast
//!
//! This actor is responsible for:
//! - Managing WebSocket client connections
//! - Broadcasting stream (css) and reload messages to every client
//! - Coalescing reload bursts
//!
//! # Architecture
//!
//! ```text
//! Pipeline --[Css/Reload]--> WsActor --[broadcast]--> Clients
//! ```

mod client_io;
mod delivery;

use std::net::TcpStream;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;

use super::messages::WsMsg;
use crate::reload::message::HotReloadMessage;

/// Reloads closer together than this collapse into the first one.
const RELOAD_COALESCE: Duration = Duration::from_millis(150);

/// A connected preview client
struct RegisteredClient {
    ws: WebSocket<TcpStream>,
}

/// WebSocket Actor - manages client connections and broadcasts
pub struct WsActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<WsMsg>,
    /// Connected clients (shared for broadcast + read threads)
    clients: Arc<Mutex<Vec<RegisteredClient>>>,
    /// Time of the last reload broadcast
    last_reload: Option<Instant>,
}

impl WsActor {
    /// Create a new WsActor
    pub fn new(rx: mpsc::Receiver<WsMsg>) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
            last_reload: None,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        let clients_for_reader = Arc::clone(&self.clients);
        std::thread::spawn(move || {
            Self::client_reader_loop(clients_for_reader);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Css => {
                    let sent = self.broadcast(&HotReloadMessage::Css);
                    crate::debug!("ws"; "css update to {} clients", sent);
                }
                WsMsg::Reload { reason } => {
                    if self.should_reload(Instant::now()) {
                        let sent = self.broadcast(&HotReloadMessage::reload_with_reason(&reason));
                        crate::debug!("ws"; "reload ({}) to {} clients", reason, sent);
                    } else {
                        crate::debug!("ws"; "coalesced reload: {}", reason);
                    }
                }
                WsMsg::AddClient(stream) => self.add_client(stream),
                WsMsg::Shutdown => break,
            }
        }

        self.close_all();
        crate::debug!("ws"; "stopped");
    }

    /// Record a reload at `now` unless one went out within the window.
    fn should_reload(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_reload
            && now.saturating_duration_since(last) < RELOAD_COALESCE
        {
            return false;
        }
        self.last_reload = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_coalescing() {
        let (_tx, rx) = mpsc::channel(1);
        let mut actor = WsActor::new(rx);
        let start = Instant::now();

        assert!(actor.should_reload(start));
        assert!(!actor.should_reload(start + Duration::from_millis(50)));
        assert!(!actor.should_reload(start + Duration::from_millis(149)));
        assert!(actor.should_reload(start + Duration::from_millis(150)));
        assert!(!actor.should_reload(start + Duration::from_millis(200)));
        assert!(actor.should_reload(start + Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_shutdown_stops_actor() {
        let (tx, rx) = mpsc::channel(4);
        let actor = WsActor::new(rx);
        tx.send(WsMsg::Reload {
            reason: "x".into(),
        })
        .await
        .unwrap();
        tx.send(WsMsg::Shutdown).await.unwrap();
        tokio::time::timeout(Duration::from_secs(2), actor.run())
            .await
            .unwrap();
    }
}
