//! Buffered responses and content-type selection.

use std::path::Path;

/// Content types keyed by lowercase file extension.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
];

/// Content type used for unknown extensions, directory listings and error pages.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// A complete, fully buffered HTTP response.
///
/// Constructed once by whichever component answers the request and consumed
/// once by the transport. There are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// An HTML response with the default content type.
    pub fn html(status: u16, body: String) -> Self {
        Self::new(status, DEFAULT_CONTENT_TYPE, body.into_bytes())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Length of the body in bytes, as sent in `Content-Length`.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// Pick a content type from the extension of `path`.
///
/// The lookup ignores ASCII case; anything not in the table is served as
/// `text/html`.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// Wrap `body` in a response whose content type is derived from `path`.
pub fn build_response(path: &Path, body: Vec<u8>, status: u16) -> Response {
    Response::new(status, content_type_for(path), body)
}
