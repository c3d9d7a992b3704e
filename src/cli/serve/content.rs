//! Reload client injection.

use crate::utils::mime;

/// Inject the reload client if the body is HTML.
pub fn maybe_inject_hotreload(body: Vec<u8>, content_type: &str) -> Vec<u8> {
    if mime::is_html(content_type) {
        inject_hotreload_script(&body)
    } else {
        body
    }
}

/// Inject the reload client before the last `</body>` tag
fn inject_hotreload_script(content: &[u8]) -> Vec<u8> {
    use crate::embed::serve::HOTRELOAD_JS;

    let script = HOTRELOAD_JS.external_tag();
    let script_bytes = script.as_bytes();

    const PATTERN: &[u8] = b"</body>";

    let pos = content
        .windows(PATTERN.len())
        .rposition(|w| w.eq_ignore_ascii_case(PATTERN))
        .unwrap_or(content.len());

    let mut result = Vec::with_capacity(content.len() + script_bytes.len());
    result.extend_from_slice(&content[..pos]);
    result.extend_from_slice(script_bytes);
    result.extend_from_slice(&content[pos..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::mime::types::{CSS, HTML};

    #[test]
    fn test_inject_before_body_close() {
        let out = maybe_inject_hotreload(b"<html><body><p>x</p></BODY></html>".to_vec(), HTML);
        let out = String::from_utf8(out).unwrap();
        let script = out.find("<script").unwrap();
        assert!(script < out.find("</BODY>").unwrap());
        assert!(out.starts_with("<html><body><p>x</p>"));
    }

    #[test]
    fn test_inject_appends_without_body() {
        let out = maybe_inject_hotreload(b"<p>fragment</p>".to_vec(), HTML);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("<p>fragment</p><script"));
    }

    #[test]
    fn test_non_html_untouched() {
        let body = b"body { color: red }".to_vec();
        assert_eq!(maybe_inject_hotreload(body.clone(), CSS), body);
    }
}
