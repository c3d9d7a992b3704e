//! Slash-separated path keys.
//!
//! Manifest keys and served URLs always use `/`, whatever the host platform
//! separator is.

use std::path::{Component, Path};

/// Render a relative path with `/` separators.
///
/// Only normal components are kept; `.` and prefixes are dropped.
///
/// # Example
/// ```ignore
/// assert_eq!(to_slash(Path::new("pages/about.min.css")), "pages/about.min.css");
/// ```
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_to_slash_single() {
        assert_eq!(to_slash(Path::new("app.min.css")), "app.min.css");
    }

    #[test]
    fn test_to_slash_nested() {
        let path: PathBuf = ["pages", "blog", "post.min.js"].iter().collect();
        assert_eq!(to_slash(&path), "pages/blog/post.min.js");
    }

    #[test]
    fn test_to_slash_skips_cur_dir() {
        assert_eq!(to_slash(Path::new("./img/logo.png")), "img/logo.png");
    }
}
