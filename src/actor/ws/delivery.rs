use tungstenite::protocol::Message;

use super::WsActor;
use crate::reload::message::HotReloadMessage;

impl WsActor {
    /// Send `msg` to every client, dropping the ones that fail.
    ///
    /// Returns the number of clients that received it.
    pub(super) fn broadcast(&self, msg: &HotReloadMessage) -> usize {
        let mut clients = self.clients.lock();
        if clients.is_empty() {
            crate::debug!("ws"; "no clients, {:?} not sent", msg);
            return 0;
        }

        let frame = Message::Text(msg.to_json().into());
        clients.retain_mut(|client| {
            client.ws.send(frame.clone()).map_or_else(
                |e| {
                    crate::debug!("ws"; "dropping client: {}", e);
                    false
                },
                |()| true,
            )
        });
        clients.len()
    }

    /// Close every connection and forget the clients.
    pub(super) fn close_all(&self) {
        for mut client in self.clients.lock().drain(..) {
            let _ = client.ws.close(None);
            let _ = client.ws.flush();
        }
    }
}
