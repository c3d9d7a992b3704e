//! Actor Message Definitions
//!
//! Message types for inter-actor communication.
//!
//! ```text
//! FsActor --Changed--> TaskRunner --(ReloadHandle)--> WsActor
//! ```

use crate::core::Category;

// =============================================================================
// TaskRunner Messages
// =============================================================================

/// Messages to the task runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerMsg {
    /// Sources of these categories changed
    Changed(Vec<Category>),
    /// Shutdown
    Shutdown,
}

// =============================================================================
// WsActor Messages
// =============================================================================

/// Messages to WebSocket Actor
#[derive(Debug)]
pub enum WsMsg {
    /// Swap stylesheets in place
    Css,
    /// Reload page
    Reload { reason: String },
    /// Add client (raw stream, handshake pending)
    AddClient(std::net::TcpStream),
    /// Shutdown
    Shutdown,
}
