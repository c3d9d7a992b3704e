//! Command-line interface module.

mod args;
pub mod build;
pub mod serve;
pub mod watch;

pub use args::{BuildArgs, Cli, Commands, ServeArgs};
