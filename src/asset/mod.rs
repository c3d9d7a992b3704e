//! Asset primitives used by the pipeline tasks.
//!
//! - [`glob`]: source glob resolution and tree scanning
//! - [`scss`]: stylesheet compilation
//! - [`minify`]: CSS and JS minification
//! - [`revision`]: suffix and content-hash file naming

pub mod glob;
pub mod minify;
pub mod revision;
pub mod scss;

pub use glob::{SourceFile, SourcePatterns};
