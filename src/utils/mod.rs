//! Shared helpers with no pipeline knowledge.

pub mod mime;
pub mod path;
