//! Filesystem path normalization and file walking.

use std::io;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};

/// Absolute form of `path`, with symlinks resolved when it exists.
///
/// Removed files cannot be canonicalized; watch events for them still need
/// an absolute path comparable to the glob bases, so those are made absolute
/// lexically.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Make `path` relative to `base`, or `None` when it lies outside.
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}

/// Every regular file below `dir`, in walk order.
///
/// The walk runs on the calling thread. Callers are often rayon tasks
/// themselves, and a pooled walk inside a busy pool aborts instead of
/// waiting. Walk errors are yielded, not skipped.
pub fn walk_files(dir: &Path, skip_hidden: bool) -> impl Iterator<Item = io::Result<PathBuf>> {
    WalkDir::new(dir)
        .parallelism(Parallelism::Serial)
        .skip_hidden(skip_hidden)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.path())),
            Ok(_) => None,
            Err(e) => Some(Err(io::Error::other(e))),
        })
}
