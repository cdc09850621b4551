use super::response::write_response;
use crate::error::report_with_status;
use crate::site::Site;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use tracing::warn;

/// `HttpService` adapter that answers every request from a [`Site`].
#[derive(Debug, Clone)]
pub struct SiteService {
    site: Site,
}

impl SiteService {
    pub fn new(site: Site) -> Self {
        Self { site }
    }
}

/// Drop the query string (and any fragment) from a request target.
pub fn strip_query(target: &str) -> &str {
    target.split(['?', '#']).next().unwrap_or(target)
}

impl HttpService for SiteService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let path = strip_query(req.path());
        let response = if Method::GET == req.method() {
            self.site.handle(path)
        } else {
            warn!(method = req.method(), path, "unsupported method");
            report_with_status(
                path,
                &format!("Unsupported method ('{}')", req.method()),
                501,
            )
        };
        write_response(res, response);
        Ok(())
    }
}
