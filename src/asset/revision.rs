//! Revisioned file naming.
//!
//! `app.scss` → `app.css` → `app.min.css` → `app.min-0123456789.css`

use std::path::{Path, PathBuf};

/// Hex prefix of the blake3 hash of `content`.
pub fn content_hash(content: &[u8], len: usize) -> String {
    let hash = blake3::hash(content);
    let mut hex = hex::encode(hash.as_bytes());
    hex.truncate(len);
    hex
}

/// Append `suffix` to the file stem: `app.css` + `.min` → `app.min.css`.
pub fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return path.to_path_buf();
    };
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

/// Insert `-hash` before the last extension: `app.min.css` → `app.min-<hash>.css`.
pub fn revisioned(path: &Path, hash: &str) -> PathBuf {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return path.to_path_buf();
    };
    let name = match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}-{hash}{}", &name[..dot], &name[dot..]),
        _ => format!("{name}-{hash}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_deterministic() {
        let a = content_hash(b"body{color:red}", 10);
        assert_eq!(a.len(), 10);
        assert_eq!(a, content_hash(b"body{color:red}", 10));
        assert_ne!(a, content_hash(b"body{color:blue}", 10));
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_hash_is_prefix() {
        let short = content_hash(b"x", 8);
        let long = content_hash(b"x", 64);
        assert_eq!(long.len(), 64);
        assert!(long.starts_with(&short));
    }

    #[test]
    fn test_suffixed() {
        assert_eq!(suffixed(Path::new("app.css"), ".min"), Path::new("app.min.css"));
        assert_eq!(
            suffixed(Path::new("pages/about.js"), ".min"),
            Path::new("pages/about.min.js")
        );
        assert_eq!(suffixed(Path::new("LICENSE"), ".min"), Path::new("LICENSE.min"));
    }

    #[test]
    fn test_revisioned() {
        assert_eq!(
            revisioned(Path::new("app.min.css"), "abc123"),
            Path::new("app.min-abc123.css")
        );
        assert_eq!(
            revisioned(Path::new("js/vendor.min.js"), "ff"),
            Path::new("js/vendor.min-ff.js")
        );
        assert_eq!(revisioned(Path::new("noext"), "ff"), Path::new("noext-ff"));
    }
}
