use std::path::PathBuf;

use crate::core::Category;

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// A settled batch mapped to the categories it touches
#[derive(Debug)]
pub(super) struct ClassifiedBatch {
    /// Relevant changes, sorted by path
    pub(super) changes: Vec<(PathBuf, ChangeKind)>,
    /// Affected categories in pipeline order
    pub(super) categories: Vec<Category>,
}
