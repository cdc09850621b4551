//! Directory listings for directories without an index file.

use crate::content::Response;
use crate::error::ServeError;
use crate::templates::{render, LISTING_PAGE};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fs;
use std::path::Path;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// One visible child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_directory: bool,
    /// File size in bytes; `None` for directories.
    pub size_bytes: Option<u64>,
    /// Percent-encoded link target, with a trailing `/` for directories.
    pub href_path: String,
}

impl ListingEntry {
    fn to_html(&self) -> String {
        let href = encode_double_quoted_attribute(&self.href_path);
        let name = encode_text(&self.name);
        match self.size_bytes {
            Some(size) if !self.is_directory => format!(
                "<li><a href=\"{}\">{}</a> ({})</li>",
                href,
                name,
                format_size(size)
            ),
            _ => format!("<li><a href=\"{}\">{}/</a></li>", href, name),
        }
    }
}

/// Build the listing page for `directory`, requested as `request_path`.
///
/// `at_root` suppresses the parent-directory link.
///
/// # Errors
///
/// [`ServeError::ListingFailure`] if the directory or any entry's metadata
/// cannot be read, including entries that vanish mid-listing.
pub fn list(directory: &Path, request_path: &str, at_root: bool) -> Result<Response, ServeError> {
    let entries = collect_entries(directory, request_path)?;

    let mut items = Vec::with_capacity(entries.len() + 1);
    if !at_root {
        items.push(format!(
            "<li><a href=\"{}\">../</a></li>",
            encode_double_quoted_attribute(&encode_path(parent_path(request_path)))
        ));
    }
    items.extend(entries.iter().map(ListingEntry::to_html));

    let path = encode_text(request_path);
    let entries_html = items.join("\n    ");
    let page = render(LISTING_PAGE, &[("path", &*path), ("entries", &entries_html)]);
    Ok(Response::html(200, page))
}

/// Read the non-hidden children of `directory`, sorted by name.
///
/// Names are compared as strings, byte-wise, so the order is case-sensitive
/// (`B` sorts before `a`).
pub fn collect_entries(
    directory: &Path,
    request_path: &str,
) -> Result<Vec<ListingEntry>, ServeError> {
    let listing_failure = |source| ServeError::ListingFailure {
        path: request_path.to_string(),
        source,
    };
    let base = request_path.trim_end_matches('/');

    let mut entries = Vec::new();
    for entry in fs::read_dir(directory).map_err(listing_failure)? {
        let entry = entry.map_err(listing_failure)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        // Follow links so a link to a directory lists as a directory.
        let metadata = fs::metadata(entry.path()).map_err(listing_failure)?;
        let is_directory = metadata.is_dir();
        let mut href_path = encode_path(&format!("{}/{}", base, name));
        if is_directory {
            href_path.push('/');
        }
        entries.push(ListingEntry {
            name,
            is_directory,
            size_bytes: (!is_directory).then(|| metadata.len()),
            href_path,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Format a byte count with base-1024 units and one decimal place.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in &SIZE_UNITS[..SIZE_UNITS.len() - 1] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} {}", size, SIZE_UNITS[SIZE_UNITS.len() - 1])
}

fn parent_path(request_path: &str) -> &str {
    let trimmed = request_path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &trimmed[..idx],
    }
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(500), "500.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1_572_864), "1.5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024 * 1024), "2048.0 TB");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/sub"), "/");
        assert_eq!(parent_path("/sub/"), "/");
        assert_eq!(parent_path("/sub/deeper/"), "/sub");
        assert_eq!(parent_path("/a/b/c"), "/a/b");
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("/docs/my file.txt"), "/docs/my%20file.txt");
    }

    #[test]
    fn test_entries_sorted_and_hidden_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "12345").unwrap();
        fs::write(dir.path().join("B.txt"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "x").unwrap();
        fs::create_dir(dir.path().join("a_dir")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let entries = collect_entries(dir.path(), "/files/").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B.txt", "a_dir", "b.txt"]);

        assert!(entries[1].is_directory);
        assert_eq!(entries[1].size_bytes, None);
        assert_eq!(entries[1].href_path, "/files/a_dir/");
        assert!(!entries[2].is_directory);
        assert_eq!(entries[2].size_bytes, Some(5));
        assert_eq!(entries[2].href_path, "/files/b.txt");
    }

    #[test]
    fn test_list_renders_parent_link_below_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), vec![0u8; 2048]).unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();

        let resp = list(dir.path(), "/docs", false).unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.content_type(), "text/html");
        let body = String::from_utf8(resp.into_body()).unwrap();
        assert!(body.contains("Directory: /docs"));
        assert!(body.contains("<li><a href=\"/\">../</a></li>"));
        assert!(body.contains("<li><a href=\"/docs/img/\">img/</a></li>"));
        assert!(body.contains("<li><a href=\"/docs/notes.txt\">notes.txt</a> (2.0 KB)</li>"));
    }

    #[test]
    fn test_list_at_root_has_no_parent_link() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let body = String::from_utf8(list(dir.path(), "/", true).unwrap().into_body()).unwrap();
        assert!(!body.contains("../"));
        assert!(body.contains("<li><a href=\"/a.txt\">a.txt</a> (1.0 B)</li>"));
    }

    #[cfg(unix)]
    #[test]
    fn test_markup_in_names_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("<b>&\"q\".txt"), "x").unwrap();
        let body = String::from_utf8(list(dir.path(), "/<i>", false).unwrap().into_body()).unwrap();
        assert!(body.contains("Directory: /&lt;i&gt;"));
        assert!(body.contains(
            "<li><a href=\"/%3Ci%3E/%3Cb%3E%26%22q%22.txt\">&lt;b&gt;&amp;\"q\".txt</a> (1.0 B)</li>"
        ));
        assert!(!body.contains("<b>"));
    }

    #[test]
    fn test_missing_directory_is_listing_failure() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        assert!(matches!(
            list(&gone, "/gone", false),
            Err(ServeError::ListingFailure { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_entry_is_listing_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling")).unwrap();
        assert!(matches!(
            collect_entries(dir.path(), "/"),
            Err(ServeError::ListingFailure { .. })
        ));
    }
}
