use std::io::ErrorKind;
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tungstenite::protocol::Message;

use super::{RegisteredClient, WsActor};
use crate::reload::message::HotReloadMessage;

/// How often idle sockets are polled for close frames.
const READ_POLL: Duration = Duration::from_millis(100);

impl WsActor {
    /// Complete the handshake and register the client.
    ///
    /// The handshake runs on the blocking stream; afterwards the socket is
    /// switched to non-blocking so the reader thread can poll it.
    pub(super) fn add_client(&self, stream: TcpStream) {
        let mut ws = match tungstenite::accept(stream) {
            Ok(ws) => ws,
            Err(e) => {
                crate::debug!("ws"; "handshake failed: {}", e);
                return;
            }
        };

        let _ = ws.get_ref().set_nonblocking(true);
        let hello = Message::Text(HotReloadMessage::connected().to_json().into());
        if let Err(e) = ws.send(hello) {
            crate::debug!("ws"; "client gone before greeting: {}", e);
            return;
        }

        let mut clients = self.clients.lock();
        clients.push(RegisteredClient { ws });
        crate::debug!("ws"; "{} client(s) connected", clients.len());
    }

    /// Poll clients for incoming frames and drop closed sockets.
    ///
    /// Runs on its own thread until shutdown or until the actor drops its
    /// handle on the client list.
    pub(super) fn client_reader_loop(clients: Arc<Mutex<Vec<RegisteredClient>>>) {
        while !crate::core::is_shutdown() && Arc::strong_count(&clients) > 1 {
            std::thread::sleep(READ_POLL);
            clients.lock().retain_mut(is_open);
        }
    }
}

/// Drain one frame; `false` once the peer is gone.
fn is_open(client: &mut RegisteredClient) -> bool {
    match client.ws.read() {
        Ok(Message::Close(_)) => false,
        Ok(_) => true,
        Err(tungstenite::Error::Io(e)) => e.kind() == ErrorKind::WouldBlock,
        Err(_) => false,
    }
}
