//! Request path resolution and the document-root sandbox.
//!
//! A request path is percent-decoded, stripped of one leading `/`, and walked
//! component by component from the document root. Each component that exists
//! on disk is canonicalized as it is reached, so `..` and symbolic links are
//! resolved the way the filesystem would resolve them; components that do not
//! exist are appended lexically (a missing entry cannot be a link). The
//! result must stay under the root or the request is rejected before any case
//! looks at it.

use crate::error::ServeError;
use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Method served by the resolution pipeline.
pub const METHOD_GET: &str = "GET";

/// Per-request state handed to the case chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    raw_path: String,
    path: String,
    canonical_path: PathBuf,
    method: &'static str,
}

impl RequestContext {
    /// Decode and resolve `raw_path` against an already canonical `document_root`.
    pub fn new(raw_path: &str, document_root: &Path) -> Result<Self, ServeError> {
        let path = decode_path(raw_path)?.into_owned();
        let canonical_path = resolve_decoded(&path, document_root)?;
        Ok(Self {
            raw_path: raw_path.to_string(),
            path,
            canonical_path,
            method: METHOD_GET,
        })
    }

    /// The path exactly as it arrived on the request line (query stripped).
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// The percent-decoded request path, used in pages, links and script
    /// environments.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute, sandbox-checked filesystem location.
    pub fn canonical_path(&self) -> &Path {
        &self.canonical_path
    }

    pub fn method(&self) -> &'static str {
        self.method
    }
}

/// Percent-decode a request path.
pub fn decode_path(raw_path: &str) -> Result<Cow<'_, str>, ServeError> {
    urlencoding::decode(raw_path).map_err(|_| ServeError::MalformedPath)
}

/// Map `raw_path` to a canonical location inside `document_root`.
///
/// `document_root` must itself be canonical (see [`crate::site::Site::new`]).
///
/// # Errors
///
/// [`ServeError::MalformedPath`] when decoding fails and
/// [`ServeError::SandboxViolation`] when the resolved path escapes the root.
pub fn resolve(raw_path: &str, document_root: &Path) -> Result<PathBuf, ServeError> {
    let decoded = decode_path(raw_path)?;
    resolve_decoded(&decoded, document_root)
}

fn resolve_decoded(path: &str, document_root: &Path) -> Result<PathBuf, ServeError> {
    let relative = path.strip_prefix('/').unwrap_or(path);
    let mut current = document_root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                current.pop();
            }
            Component::Normal(name) => {
                let candidate = current.join(name);
                current = fs::canonicalize(&candidate).unwrap_or(candidate);
            }
            // A second leading separator or a drive prefix makes the
            // remainder absolute.
            Component::RootDir | Component::Prefix(_) => {
                return Err(ServeError::SandboxViolation);
            }
        }
    }
    // A trailing separator only names a directory. Keep it on anything else
    // so that `file/` fails the existence check like the filesystem would.
    if path.ends_with('/') && !current.is_dir() {
        current.push("");
    }
    if current.starts_with(document_root) {
        Ok(current)
    } else {
        Err(ServeError::SandboxViolation)
    }
}
