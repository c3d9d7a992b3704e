//! Remove every generated artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Pipeline, PipelineError, TaskReport};
use crate::core::Category;
use crate::utils::path::walk_files;

impl Pipeline {
    /// Delete category outputs, HTML under the output root and manifests.
    ///
    /// Missing paths are skipped, so cleaning twice is a no-op.
    pub fn clean(&self) -> Result<TaskReport, PipelineError> {
        let mut report = TaskReport::default();

        for category in [Category::Styles, Category::Scripts, Category::Images] {
            report.written += remove_dir_contents(self.patterns.get(category).dest())?;
        }

        report.written += remove_html(&self.config.output_dir())?;

        for file in self.manifests.files() {
            if remove_file(file)? {
                report.written += 1;
            }
        }

        crate::debug!("clean"; "removed {} entries", report.written);
        Ok(report)
    }
}

/// Remove the entries of `dir`, keeping `dir` itself.
fn remove_dir_contents(dir: &Path) -> Result<usize, PipelineError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(PipelineError::clean(dir, e)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::clean(dir, e))?;
        let path = entry.path();
        let is_dir = entry
            .file_type()
            .map_err(|e| PipelineError::clean(&path, e))?
            .is_dir();

        let result = if is_dir {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match result {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(PipelineError::clean(&path, e)),
        }
    }

    Ok(removed)
}

/// Remove every `*.html` file below `root`.
fn remove_html(root: &Path) -> Result<usize, PipelineError> {
    if !root.is_dir() {
        return Ok(0);
    }
    remove_html_in(root, walk_files(root, false))
}

/// Remove the `*.html` entries of a walk. Nothing is removed when the walk
/// fails.
fn remove_html_in(
    root: &Path,
    files: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> Result<usize, PipelineError> {
    let mut html = Vec::new();
    for path in files {
        let path = path.map_err(|e| PipelineError::clean(root, e))?;
        if path.extension().is_some_and(|ext| ext == "html") {
            html.push(path);
        }
    }

    let mut removed = 0;
    for path in html {
        if remove_file(&path)? {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Remove a file; `false` if it was already gone.
fn remove_file(path: &Path) -> Result<bool, PipelineError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PipelineError::clean(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_dir_contents_keeps_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.css"), "").unwrap();
        fs::write(dir.path().join("sub/b.css"), "").unwrap();

        assert_eq!(remove_dir_contents(dir.path()).unwrap(), 2);
        assert!(dir.path().is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        assert_eq!(remove_dir_contents(&dir.path().join("nope")).unwrap(), 0);
        assert_eq!(remove_html(&dir.path().join("nope")).unwrap(), 0);
        assert!(!remove_file(&dir.path().join("nope.json")).unwrap());
    }

    #[test]
    fn test_remove_html_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("index.html"), "").unwrap();
        fs::write(dir.path().join("pages/about.html"), "").unwrap();
        fs::write(dir.path().join("robots.txt"), "").unwrap();

        assert_eq!(remove_html(dir.path()).unwrap(), 2);
        assert!(dir.path().join("robots.txt").exists());
        assert!(!dir.path().join("pages/about.html").exists());
    }

    #[test]
    fn test_walk_error_fails_clean() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("index.html");
        fs::write(&page, "").unwrap();

        let walk = vec![
            Ok(page.clone()),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        ];
        let err = remove_html_in(dir.path(), walk).unwrap_err();
        assert!(matches!(err, PipelineError::Clean(ref path, _) if path == dir.path()));
        assert!(page.exists());
    }
}
