//! Fixed HTML page templates.
//!
//! Templates are plain strings with `{name}` placeholders. They are filled in a
//! single left-to-right pass so that substituted values are never themselves
//! scanned for placeholders.

/// Error page, parameterized by `{path}` and `{msg}`.
pub const ERROR_PAGE: &str = "<html>
<head><title>Error</title></head>
<body>
    <h1>Error accessing {path}</h1>
    <p>{msg}</p>
    <hr>
    <p><em>chainserve</em></p>
</body>
</html>
";

/// Directory listing page, parameterized by `{path}` and `{entries}`.
pub const LISTING_PAGE: &str = "<html>
<head><title>Directory: {path}</title></head>
<body>
    <h1>Directory: {path}</h1>
    <ul>
    {entries}
    </ul>
    <hr>
    <p><em>chainserve</em></p>
</body>
</html>
";

/// Fill `{name}` placeholders in `template` from `fields`.
///
/// Unknown placeholders and unmatched braces are copied through unchanged.
pub fn render(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            fields
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
