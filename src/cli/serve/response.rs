//! HTTP response handlers.

use super::content::maybe_inject_hotreload;
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a file from the output tree, injecting the reload client
/// into HTML.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    // Media seeking
    if let Some(range) = get_range_header(&request) {
        return respond_range(request, path, content_type, &range);
    }

    let body = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let body = maybe_inject_hotreload(body, content_type);

    send_body(request, 200, content_type, body)
}

/// Handle Range request for media files.
fn respond_range(
    request: Request,
    path: &Path,
    content_type: &'static str,
    range: &str,
) -> Result<()> {
    use std::io::{Read, Seek, SeekFrom};

    let file_size = fs::metadata(path)?.len();
    if file_size == 0 {
        return send_body(request, 200, content_type, Vec::new());
    }

    let range = range.strip_prefix("bytes=").unwrap_or(range);
    let (start, end) = parse_range(range, file_size);
    if start > end {
        let response = Response::empty(StatusCode(416)).with_header(header(
            "Content-Range",
            &format!("bytes */{file_size}"),
        )?);
        request.respond(response)?;
        return Ok(());
    }

    let length = end - start + 1;

    let mut file = fs::File::open(path)?;
    file.seek(SeekFrom::Start(start))?;
    let reader = file.take(length);

    let response = Response::new(
        StatusCode(206),
        vec![
            header("Content-Type", content_type)?,
            header("Content-Range", &format!("bytes {start}-{end}/{file_size}"))?,
            header("Accept-Ranges", "bytes")?,
        ],
        reader,
        usize::try_from(length).ok(),
        None,
    );

    request.respond(response)?;
    Ok(())
}

/// Parse a Range value "start-end" into inclusive byte bounds.
///
/// `file_size` must be non-zero.
fn parse_range(range: &str, file_size: u64) -> (u64, u64) {
    let last = file_size - 1;
    let parts: Vec<&str> = range.trim().split('-').collect();

    match parts.as_slice() {
        // "0-499"
        [s, e] if !s.is_empty() && !e.is_empty() => {
            let start: u64 = s.trim().parse().unwrap_or(0);
            let end: u64 = e.trim().parse().unwrap_or(last);
            (start, end.min(last))
        }
        // "500-"
        [s, ""] if !s.is_empty() => (s.trim().parse().unwrap_or(0), last),
        // "-500"
        ["", e] if !e.is_empty() => {
            let suffix: u64 = e.trim().parse().unwrap_or(0);
            (file_size.saturating_sub(suffix), last)
        }
        _ => (0, last),
    }
}

fn get_range_header(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case("range"))
        .map(|h| h.value.to_string())
}

/// Respond with 404 page (custom `404.html` in the output root, or plain).
pub fn respond_not_found(request: Request, output_dir: &Path) -> Result<()> {
    use crate::utils::mime::types::{HTML, PLAIN};

    let custom_404 = output_dir.join("404.html");
    let has_custom = custom_404.is_file();

    if is_head_request(&request) {
        let mime = if has_custom { HTML } else { PLAIN };
        return send_head(request, 404, mime);
    }

    if has_custom
        && let Ok(body) = fs::read(&custom_404)
    {
        let body = maybe_inject_hotreload(body, HTML);
        return send_body(request, 404, HTML, body);
    }

    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    use crate::utils::mime::types::PLAIN;
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with the reload client from memory.
pub fn respond_hotreload_js(request: Request, ws_port: u16) -> Result<()> {
    use crate::embed::serve::{HOTRELOAD_JS, HotreloadVars};
    use crate::utils::mime::types::JAVASCRIPT;

    let body = HOTRELOAD_JS.render(&HotreloadVars { ws_port });
    send_body(request, 200, JAVASCRIPT, body.into_bytes())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(header("Content-Type", content_type)?)
        .with_header(header("Cache-Control", "no-cache")?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", content_type)?)
        .with_header(header("Cache-Control", "no-cache")?);
    request.respond(response)?;
    Ok(())
}

fn header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow::anyhow!("invalid header `{key}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_explicit() {
        assert_eq!(parse_range("0-499", 1000), (0, 499));
        assert_eq!(parse_range("900-2000", 1000), (900, 999));
    }

    #[test]
    fn test_parse_range_open_ended() {
        assert_eq!(parse_range("500-", 1000), (500, 999));
    }

    #[test]
    fn test_parse_range_suffix() {
        assert_eq!(parse_range("-100", 1000), (900, 999));
        assert_eq!(parse_range("-5000", 1000), (0, 999));
    }

    #[test]
    fn test_parse_range_malformed() {
        assert_eq!(parse_range("abc", 10), (0, 9));
    }

    #[test]
    fn test_parse_range_start_past_end() {
        let (start, end) = parse_range("2000-", 1000);
        assert!(start > end);
    }
}
