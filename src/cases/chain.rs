use crate::content::{build_response, Response};
use crate::error::ServeError;
use crate::listing;
use crate::resolver::RequestContext;
use crate::script::ScriptRunner;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One entry of the resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    NoResource,
    Script,
    RegularFile,
    DirectoryWithIndex,
    DirectoryListing,
    Fallback,
}

impl Case {
    /// Evaluation order. Earlier cases win.
    pub const ORDER: [Case; 6] = [
        Case::NoResource,
        Case::Script,
        Case::RegularFile,
        Case::DirectoryWithIndex,
        Case::DirectoryListing,
        Case::Fallback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Case::NoResource => "no_resource",
            Case::Script => "script",
            Case::RegularFile => "regular_file",
            Case::DirectoryWithIndex => "directory_with_index",
            Case::DirectoryListing => "directory_listing",
            Case::Fallback => "fallback",
        }
    }
}

/// Immutable configuration the cases test and act against.
#[derive(Debug, Clone)]
pub struct CaseChain {
    document_root: PathBuf,
    index_file: String,
    script_extension: String,
    runner: ScriptRunner,
    server_name: String,
    server_port: u16,
}

impl CaseChain {
    /// `document_root` must be canonical; `script_extension` is given
    /// without the leading dot.
    pub fn new(
        document_root: PathBuf,
        index_file: impl Into<String>,
        script_extension: impl Into<String>,
        runner: ScriptRunner,
        server_name: impl Into<String>,
        server_port: u16,
    ) -> Self {
        Self {
            document_root,
            index_file: index_file.into(),
            script_extension: script_extension.into(),
            runner,
            server_name: server_name.into(),
            server_port,
        }
    }

    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// Classify the request and run the winning case.
    pub fn dispatch(&self, ctx: &RequestContext) -> Result<Response, ServeError> {
        let case = self.classify(ctx);
        debug!(
            case = case.name(),
            method = ctx.method(),
            path = ctx.path(),
            raw_path = ctx.raw_path(),
            "request classified"
        );
        self.act(case, ctx)
    }

    /// The first case in [`Case::ORDER`] whose test matches.
    pub fn classify(&self, ctx: &RequestContext) -> Case {
        Case::ORDER
            .into_iter()
            .find(|case| self.test(*case, ctx))
            .unwrap_or(Case::Fallback)
    }

    pub fn test(&self, case: Case, ctx: &RequestContext) -> bool {
        let path = ctx.canonical_path();
        match case {
            Case::NoResource => !path.exists(),
            Case::Script => path.is_file() && self.is_script(path),
            Case::RegularFile => path.is_file() && !self.is_script(path),
            Case::DirectoryWithIndex => path.is_dir() && self.index_path(path).is_file(),
            Case::DirectoryListing => path.is_dir() && !self.index_path(path).is_file(),
            Case::Fallback => true,
        }
    }

    pub fn act(&self, case: Case, ctx: &RequestContext) -> Result<Response, ServeError> {
        let path = ctx.canonical_path();
        match case {
            Case::NoResource => Err(ServeError::NotFound {
                path: ctx.path().to_string(),
            }),
            Case::Script => {
                let result =
                    self.runner
                        .execute(path, ctx.path(), &self.server_name, self.server_port)?;
                Ok(build_response(path, result.stdout, 200))
            }
            Case::RegularFile => serve_file(path, ctx),
            Case::DirectoryWithIndex => serve_file(&self.index_path(path), ctx),
            Case::DirectoryListing => {
                listing::list(path, ctx.path(), path == self.document_root.as_path())
            }
            Case::Fallback => Err(ServeError::UnclassifiedRequest {
                path: ctx.path().to_string(),
            }),
        }
    }

    fn is_script(&self, path: &Path) -> bool {
        path.extension() == Some(OsStr::new(&self.script_extension))
    }

    fn index_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.index_file)
    }
}

fn serve_file(path: &Path, ctx: &RequestContext) -> Result<Response, ServeError> {
    let body = fs::read(path).map_err(|source| ServeError::ReadFailure {
        path: ctx.path().to_string(),
        source,
    })?;
    Ok(build_response(path, body, 200))
}
