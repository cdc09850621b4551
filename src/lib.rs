//! # chainserve
//!
//! **chainserve** is a small HTTP origin server that maps request paths onto a
//! document root. Each request is resolved through an ordered chain of cases
//! that decides whether the path names a missing resource, a script, a regular
//! file, a directory with an index file, or a directory to list.
//!
//! ## Architecture
//!
//! - **[`resolver`]** - percent-decoding and the document-root sandbox
//! - **[`cases`]** - the ordered case chain that classifies and answers a path
//! - **[`content`]** - buffered responses and content-type selection
//! - **[`listing`]** - directory listings
//! - **[`script`]** - script execution with a deadline and captured output
//! - **[`error`]** - the failure taxonomy and the error page
//! - **[`site`]** - the per-request entry point and single failure boundary
//! - **[`server`]** - the HTTP transport, built on `may_minihttp`
//! - **[`config`]**, **[`runtime_config`]**, **[`otel`]** - configuration and logging
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as SiteService<br/>(may_minihttp)
//!     participant Site
//!     participant Resolver
//!     participant Chain as CaseChain
//!     participant Runner as ScriptRunner
//!
//!     Client->>Server: GET /docs/report.py
//!     Server->>Site: handle("/docs/report.py")
//!     Site->>Resolver: decode + canonicalize
//!     alt Escapes document root
//!         Resolver-->>Site: SandboxViolation
//!         Site-->>Client: 404 error page
//!     end
//!     Resolver-->>Site: RequestContext
//!     Site->>Chain: dispatch(ctx)
//!     Chain->>Chain: first matching case
//!     Chain->>Runner: execute(script)
//!     Runner-->>Chain: stdout (exit 0)
//!     Chain-->>Site: Response
//!     Site-->>Server: Response
//!     Server-->>Client: 200 text/html
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use chainserve::config::ServerConfig;
//! use chainserve::server::{HttpServer, SiteService};
//! use chainserve::site::Site;
//!
//! let config = ServerConfig {
//!     document_root: "./public".into(),
//!     ..ServerConfig::default()
//! };
//! let site = Site::new(&config).expect("usable document root");
//! let handle = HttpServer(SiteService::new(site))
//!     .start(config.bind_addr())
//!     .expect("bind");
//! handle.join().ok();
//! ```

pub mod cases;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod listing;
pub mod otel;
pub mod resolver;
pub mod runtime_config;
pub mod samples;
pub mod script;
pub mod server;
pub mod site;
pub mod templates;

pub use cases::{Case, CaseChain};
pub use config::ServerConfig;
pub use content::Response;
pub use error::{ConfigError, ServeError};
pub use resolver::{resolve, RequestContext};
pub use script::{ProcessExecutionResult, ScriptRunner};
pub use site::Site;
