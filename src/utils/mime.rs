//! Content types for files served from the output tree.

use std::path::Path;

/// Content types the server refers to by name.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
}

/// Extension → content type. Lookup ignores ASCII case.
const BY_EXTENSION: &[(&[&str], &str)] = &[
    (&["html", "htm"], types::HTML),
    (&["css"], types::CSS),
    (&["js", "mjs", "cjs"], types::JAVASCRIPT),
    (&["json", "map"], types::JSON),
    (&["txt"], types::PLAIN),
    (&["xml"], "application/xml"),
    (&["wasm"], "application/wasm"),
    (&["svg"], "image/svg+xml"),
    (&["png"], types::PNG),
    (&["jpg", "jpeg"], types::JPEG),
    (&["gif"], "image/gif"),
    (&["webp"], "image/webp"),
    (&["avif"], "image/avif"),
    (&["ico"], "image/x-icon"),
    (&["woff"], "font/woff"),
    (&["woff2"], "font/woff2"),
    (&["ttf"], "font/ttf"),
    (&["otf"], "font/otf"),
    (&["mp4"], "video/mp4"),
    (&["webm"], "video/webm"),
    (&["mp3"], "audio/mpeg"),
];

/// Content type for `path`, `application/octet-stream` when unknown.
pub fn from_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return types::OCTET_STREAM;
    };
    BY_EXTENSION
        .iter()
        .find(|(exts, _)| exts.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .map_or(types::OCTET_STREAM, |&(_, mime)| mime)
}

/// HTML responses get the reload client injected.
pub fn is_html(mime: &str) -> bool {
    mime.starts_with("text/html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(&PathBuf::from("index.html")), types::HTML);
        assert_eq!(from_path(&PathBuf::from("app.min-1a2b3c4d5e.css")), types::CSS);
        assert_eq!(from_path(&PathBuf::from("main.min-0f9e8d7c6b.js")), types::JAVASCRIPT);
        assert_eq!(from_path(&PathBuf::from("logo.png")), types::PNG);
        assert_eq!(from_path(&PathBuf::from("photo.JPEG")), types::JPEG);
        assert_eq!(from_path(&PathBuf::from("rev-manifest-css.json")), types::JSON);
        assert_eq!(from_path(&PathBuf::from("unknown.xyz")), types::OCTET_STREAM);
        assert_eq!(from_path(&PathBuf::from("Makefile")), types::OCTET_STREAM);
    }

    #[test]
    fn test_is_html() {
        assert!(is_html(types::HTML));
        assert!(!is_html(types::CSS));
    }
}
