//! Task-level errors.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::Category;

/// Errors that halt a pipeline step and the sequence running it.
///
/// Per-file compile and parse failures are not errors at this level; they
/// are logged and counted in the task report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to remove `{0}`")]
    Clean(PathBuf, #[source] io::Error),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid {0} glob")]
    Glob(Category, #[source] globset::Error),

    #[error("invalid manifest `{0}`")]
    Manifest(PathBuf, #[source] serde_json::Error),

    #[error("failed to build rewrite pattern")]
    Pattern(#[from] regex::Error),
}

impl PipelineError {
    pub fn io(path: impl AsRef<Path>, err: io::Error) -> Self {
        Self::Io(path.as_ref().to_path_buf(), err)
    }

    pub fn clean(path: impl AsRef<Path>, err: io::Error) -> Self {
        Self::Clean(path.as_ref().to_path_buf(), err)
    }
}
