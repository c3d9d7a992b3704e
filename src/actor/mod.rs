//! Actor System for the Preview Server
//!
//! Message-passing concurrency for serve and watch mode:
//!
//! ```text
//! FsActor --> TaskRunner --> WsActor
//! (watch)     (pipeline)    (broadcast)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with debouncing
//! - `runner` - Runs task sequences for settled changes
//! - `ws` - WebSocket broadcast
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod runner;
pub mod ws;

pub use coordinator::Coordinator;
