//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `relative_to`)
//!   and serial file walking (`walk_files`)
//! - [`route`]: Slash-separated relative keys (`to_slash`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, relative_to, walk_files};
pub use route::to_slash;
