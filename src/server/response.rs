use crate::content::Response;
use http::StatusCode;
use may_minihttp::Response as WireResponse;

/// Reason phrase for the status line.
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown")
}

/// `Content-Type` header line for a content type produced by
/// [`crate::content`]. The wire layer only accepts `'static` header lines.
fn content_type_header(content_type: &str) -> &'static str {
    match content_type {
        "text/css" => "Content-Type: text/css",
        "application/javascript" => "Content-Type: application/javascript",
        "application/json" => "Content-Type: application/json",
        "image/jpeg" => "Content-Type: image/jpeg",
        "image/png" => "Content-Type: image/png",
        "image/gif" => "Content-Type: image/gif",
        _ => "Content-Type: text/html",
    }
}

/// Copy a buffered response onto the wire in one go. `Content-Length` is
/// derived from the body by the transport.
pub fn write_response(res: &mut WireResponse, response: Response) {
    let status = response.status();
    res.status_code(status as usize, status_reason(status));
    res.header(content_type_header(response.content_type()));
    res.body_vec(response.into_body());
}
