//! # Server Configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults ([`ServerConfig::default`])
//! 2. an optional TOML file passed with `--config`
//! 3. command-line flags
//!
//! ## Example
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8080
//! document_root = "/srv/www"
//! index_file = "index.html"
//! script_extension = "py"
//! script_interpreter = "python3"
//! script_timeout_secs = 30
//! server_name = "www.example.com"
//! ```
//!
//! An empty `script_interpreter` executes scripts directly, which requires
//! them to be executable and carry a `#!` line.

use crate::script::DEFAULT_SCRIPT_TIMEOUT;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything needed to build a [`crate::site::Site`] and bind it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind; also reported to scripts as `SERVER_PORT`.
    pub port: u16,
    /// Directory requests are resolved against.
    pub document_root: PathBuf,
    /// File served when a directory is requested.
    pub index_file: String,
    /// Extension (without the dot) marking a file as a script.
    pub script_extension: String,
    /// Program that runs scripts; empty to execute them directly.
    pub script_interpreter: Option<PathBuf>,
    /// Wall-clock limit for one script run.
    pub script_timeout_secs: u64,
    /// Name reported to scripts as `SERVER_NAME`; defaults to `host`.
    pub server_name: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            document_root: PathBuf::from("."),
            index_file: "index.html".to_string(),
            script_extension: "py".to_string(),
            script_interpreter: Some(PathBuf::from("python3")),
            script_timeout_secs: DEFAULT_SCRIPT_TIMEOUT.as_secs(),
            server_name: None,
        }
    }
}

impl ServerConfig {
    /// Load a TOML configuration file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_name(&self) -> &str {
        self.server_name.as_deref().unwrap_or(&self.host)
    }

    /// Script extension with any leading dot removed.
    pub fn script_extension(&self) -> &str {
        self.script_extension.trim_start_matches('.')
    }

    /// The configured interpreter, or `None` for direct execution.
    pub fn interpreter(&self) -> Option<PathBuf> {
        self.script_interpreter
            .clone()
            .filter(|interpreter| !interpreter.as_os_str().is_empty())
    }

    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(self.script_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "localhost:8080");
        assert_eq!(config.server_name(), "localhost");
        assert_eq!(config.script_extension(), "py");
        assert_eq!(config.interpreter(), Some(PathBuf::from("python3")));
        assert_eq!(config.script_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainserve.toml");
        std::fs::write(
            &path,
            "port = 9000\nscript_extension = \".cgi\"\nserver_name = \"www.example.com\"\n",
        )
        .unwrap();
        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.script_extension(), "cgi");
        assert_eq!(config.server_name(), "www.example.com");
    }

    #[test]
    fn test_empty_interpreter_means_direct_execution() {
        let config: ServerConfig = toml::from_str("script_interpreter = \"\"").unwrap();
        assert_eq!(config.interpreter(), None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<ServerConfig>("prot = 1").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ServerConfig::load(Path::new("/nonexistent/chainserve.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/chainserve.toml"));
    }
}
