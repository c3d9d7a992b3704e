//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve a request URL inside the output tree, serving `index.html` for
/// directories.
pub fn resolve_path(url: &str, output_dir: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    if clean.contains("..") {
        return None;
    }

    let local = output_dir.join(&clean);

    // Symlinks and encoded sequences must still land under output_dir
    let canonical = local.canonicalize().ok()?;
    let output_canonical = output_dir.canonicalize().ok()?;

    if !canonical.starts_with(&output_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/css/app.css?v=1"), "css/app.css");
        assert_eq!(normalize_url("/my%20page/"), "my page");
        assert_eq!(normalize_url("/"), "");
    }

    #[test]
    fn test_resolve_file_and_index() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("index.html"), "root").unwrap();
        fs::write(dir.path().join("docs/index.html"), "docs").unwrap();

        let root = resolve_path("/", dir.path()).unwrap();
        assert!(root.ends_with("index.html"));
        let docs = resolve_path("/docs/", dir.path()).unwrap();
        assert!(docs.ends_with("docs/index.html"));
    }

    #[test]
    fn test_resolve_rejects_traversal_and_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        assert!(resolve_path("/../a.txt", dir.path()).is_none());
        assert!(resolve_path("/%2e%2e/etc/passwd", dir.path()).is_none());
        assert!(resolve_path("/missing.css", dir.path()).is_none());
    }
}
