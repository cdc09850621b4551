//! The request resolution entry point.

use crate::cases::CaseChain;
use crate::config::ServerConfig;
use crate::content::Response;
use crate::error::{self, ConfigError, ServeError};
use crate::resolver::{decode_path, RequestContext};
use crate::script::ScriptRunner;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, info_span, warn};

/// A configured document root and the case chain serving it.
///
/// Built once at startup; cloning shares the same immutable chain.
#[derive(Debug, Clone)]
pub struct Site {
    chain: Arc<CaseChain>,
}

impl Site {
    /// Canonicalize the document root and assemble the case chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document root is missing or not a
    /// directory.
    pub fn new(config: &ServerConfig) -> Result<Self, ConfigError> {
        let root_display = config.document_root.display().to_string();
        let document_root =
            fs::canonicalize(&config.document_root).map_err(|source| ConfigError::DocumentRoot {
                root: root_display.clone(),
                source,
            })?;
        if !document_root.is_dir() {
            return Err(ConfigError::NotADirectory { root: root_display });
        }

        let runner = ScriptRunner::new(
            config.interpreter(),
            document_root.clone(),
            config.script_timeout(),
        );
        let chain = CaseChain::new(
            document_root,
            config.index_file.clone(),
            config.script_extension(),
            runner,
            config.server_name(),
            config.port,
        );
        Ok(Self {
            chain: Arc::new(chain),
        })
    }

    pub fn document_root(&self) -> &Path {
        self.chain.document_root()
    }

    /// Resolve and answer one request path. Never fails: every error becomes
    /// the 404 error page.
    pub fn handle(&self, raw_path: &str) -> Response {
        let span = info_span!("request", path = raw_path);
        let _enter = span.enter();

        match self.try_handle(raw_path) {
            Ok(response) => {
                info!(
                    status = response.status(),
                    bytes = response.content_length(),
                    "request served"
                );
                response
            }
            Err(err) => {
                if matches!(err, ServeError::UnclassifiedRequest { .. }) {
                    error!(error = %err, "request matched no case");
                } else {
                    warn!(error = %err, "request failed");
                }
                let shown = decode_path(raw_path)
                    .map(|path| path.into_owned())
                    .unwrap_or_else(|_| raw_path.to_string());
                error::report(&shown, &err.to_string())
            }
        }
    }

    /// Resolve and dispatch without converting failures.
    pub fn try_handle(&self, raw_path: &str) -> Result<Response, ServeError> {
        let ctx = RequestContext::new(raw_path, self.chain.document_root())?;
        self.chain.dispatch(&ctx)
    }
}
