//! Cloneable reload sender.
//!
//! Pipeline tasks run on blocking threads; they only need to drop a message
//! into the WebSocket actor's mailbox and move on.

use tokio::sync::mpsc;

use crate::actor::messages::WsMsg;

/// Sender side of the preview client set.
#[derive(Debug, Clone)]
pub struct ReloadHandle {
    tx: mpsc::Sender<WsMsg>,
}

impl ReloadHandle {
    pub fn new(tx: mpsc::Sender<WsMsg>) -> Self {
        Self { tx }
    }

    /// Ask clients to swap stylesheets in place.
    pub fn stream(&self) {
        self.send(WsMsg::Css);
    }

    /// Ask clients to reload the page.
    pub fn reload(&self, reason: impl Into<String>) {
        self.send(WsMsg::Reload {
            reason: reason.into(),
        });
    }

    fn send(&self, msg: WsMsg) {
        if let Err(e) = self.tx.try_send(msg) {
            crate::debug!("reload"; "notification dropped: {}", e);
        }
    }
}
