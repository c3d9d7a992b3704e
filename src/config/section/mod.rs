//! Configuration section definitions.
//!
//! Each module corresponds to a section in `assetrev.toml`:
//!
//! | Module  | TOML Section | Purpose                                   |
//! |---------|--------------|-------------------------------------------|
//! | `paths` | `[paths.*]`  | Source glob and destination per category  |
//! | `build` | `[build]`    | Output root, suffix, hashing, manifests   |
//! | `serve` | `[serve]`    | Preview server and reload socket          |

mod build;
mod paths;
mod serve;

pub use build::BuildConfig;
pub use paths::{PathPattern, PathsConfig};
pub use serve::ServeConfig;
