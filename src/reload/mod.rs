//! Reload Module
//!
//! Provides WebSocket-based live reload for the preview server.
//!
//! # Architecture
//!
//! ```text
//! Pipeline --ReloadHandle--> WsActor --JSON--> Browser
//! ```
//!
//! # Modules
//!
//! - `handle` - Cloneable sender used by pipeline tasks
//! - `message` - Hot reload message types (connected, css, reload)
//! - `server` - WebSocket listener feeding clients to the actor

pub mod handle;
pub mod message;
pub mod server;

pub use handle::ReloadHandle;
