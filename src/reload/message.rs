//! Hot Reload Message Protocol
//!
//! Defines the JSON message format for WebSocket communication between
//! the preview server and browser clients.
//!
//! # Message Types
//!
//! - `connected`: Handshake acknowledgement
//! - `css`: Re-fetch stylesheets in place (stream)
//! - `reload`: Trigger full page reload

use serde::{Deserialize, Serialize};

/// Hot reload message sent over WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HotReloadMessage {
    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },

    /// Stylesheets changed; swap them without reloading
    Css,

    /// Full page reload
    Reload {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl HotReloadMessage {
    /// Create a connected message
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Create a reload message with reason
    pub fn reload_with_reason(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: Some(reason.into()),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload"}"#.to_string())
    }

    /// Parse from JSON string
    #[cfg(test)]
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_message() {
        let msg = HotReloadMessage::reload_with_reason("html changed");
        assert_eq!(msg.to_json(), r#"{"type":"reload","reason":"html changed"}"#);
    }

    #[test]
    fn test_reload_without_reason() {
        let msg = HotReloadMessage::Reload { reason: None };
        assert_eq!(msg.to_json(), r#"{"type":"reload"}"#);
    }

    #[test]
    fn test_css_message() {
        assert_eq!(HotReloadMessage::Css.to_json(), r#"{"type":"css"}"#);
    }

    #[test]
    fn test_connected_round_trip() {
        let json = HotReloadMessage::connected().to_json();
        assert!(json.starts_with(r#"{"type":"connected","version":""#));
        assert_eq!(
            HotReloadMessage::from_json(&json),
            Some(HotReloadMessage::connected())
        );
    }
}
