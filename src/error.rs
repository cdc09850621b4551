//! Request failures and the error page they are reported with.

use crate::content::Response;
use crate::templates::{render, ERROR_PAGE};
use std::fmt;
use std::io;
use std::time::Duration;

/// Every way resolving a request can fail.
///
/// All variants are reported to the client the same way (see [`report`]); the
/// distinction matters for logging and tests.
#[derive(Debug)]
pub enum ServeError {
    /// The canonical path lies outside the document root.
    SandboxViolation,
    /// A percent-escape in the request path does not decode to UTF-8.
    MalformedPath,
    /// Nothing exists at the requested path.
    NotFound { path: String },
    /// A regular file could not be opened or read.
    ReadFailure { path: String, source: io::Error },
    /// A directory could not be enumerated.
    ListingFailure { path: String, source: io::Error },
    /// A script ran past its deadline and was killed.
    ScriptTimeout { timeout: Duration },
    /// A script exited non-zero.
    ScriptExecutionFailure { exit_code: i32, stderr: String },
    /// A script could not be spawned.
    ScriptLaunchFailure { source: io::Error },
    /// No case matched the request. Always a classification bug.
    UnclassifiedRequest { path: String },
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::SandboxViolation => write!(f, "Access denied"),
            ServeError::MalformedPath => {
                write!(f, "Request path contains an invalid percent-escape")
            }
            ServeError::NotFound { path } => write!(f, "'{}' not found", path),
            ServeError::ReadFailure { path, source } => {
                write!(f, "'{}' cannot be read: {}", path, source)
            }
            ServeError::ListingFailure { path, source } => {
                write!(f, "'{}' cannot be listed: {}", path, source)
            }
            ServeError::ScriptTimeout { timeout } => {
                write!(f, "Script timed out after {}s", timeout.as_secs_f64())
            }
            ServeError::ScriptExecutionFailure { exit_code, stderr } => {
                write!(f, "Script error (exit code {}): {}", exit_code, stderr)
            }
            ServeError::ScriptLaunchFailure { source } => {
                write!(f, "Cannot execute script: {}", source)
            }
            ServeError::UnclassifiedRequest { path } => write!(f, "Unknown object '{}'", path),
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServeError::ReadFailure { source, .. }
            | ServeError::ListingFailure { source, .. }
            | ServeError::ScriptLaunchFailure { source } => Some(source),
            _ => None,
        }
    }
}

/// Startup failures: the server cannot be built from its configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The document root does not exist or cannot be canonicalized.
    DocumentRoot { root: String, source: io::Error },
    /// The document root exists but is not a directory.
    NotADirectory { root: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DocumentRoot { root, source } => {
                write!(f, "document root '{}' is not usable: {}", root, source)
            }
            ConfigError::NotADirectory { root } => {
                write!(f, "document root '{}' is not a directory", root)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::DocumentRoot { source, .. } => Some(source),
            ConfigError::NotADirectory { .. } => None,
        }
    }
}

/// Render the error page for `request_path` with status 404.
pub fn report(request_path: &str, message: &str) -> Response {
    report_with_status(request_path, message, 404)
}

/// Render the error page with an explicit status code.
pub fn report_with_status(request_path: &str, message: &str, status: u16) -> Response {
    let path = html_escape::encode_text(request_path);
    let msg = html_escape::encode_text(message);
    Response::html(status, render(ERROR_PAGE, &[("path", &*path), ("msg", &*msg)]))
}
