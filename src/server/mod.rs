//! HTTP transport: `may_minihttp` accepts connections and parses requests,
//! [`SiteService`] hands each path to the [`Site`](crate::site::Site) and
//! writes back the buffered response.

pub mod http_server;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use response::{status_reason, write_response};
pub use service::{strip_query, SiteService};
