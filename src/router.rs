//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. A path that exists under
//! some other method answers `405` with an `allow` header; anything else
//! that misses answers `404`. Both carry a JSON error body.

use std::collections::HashMap;
use std::time::Instant;

use matchit::Router as MatchitRouter;
use tracing::{debug, error};

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

/// Outcome of a route lookup.
pub(crate) enum Lookup {
    Found(BoxedHandler),
    /// The path is routed, just not for this method. Sorted, deduplicated.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are static, so this is a startup bug.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Shorthand for `on(Method::Get, ..)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub(crate) fn lookup(&self, method: &str, path: &str) -> Lookup {
        let method = method.parse::<Method>().ok();

        if let Some(found) = method
            .and_then(|m| self.routes.get(&m))
            .and_then(|tree| tree.at(path).ok())
        {
            return Lookup::Found(found.value.clone());
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        if allowed.is_empty() {
            return Lookup::NotFound;
        }
        allowed.sort_unstable();
        Lookup::MethodNotAllowed(allowed)
    }

    /// Routes one request and produces one response.
    ///
    /// The matched handler runs on tokio's blocking pool. A handler that
    /// panics yields `500` rather than taking the connection down with it.
    pub async fn handle(&self, req: Request) -> Response {
        let started = Instant::now();
        let method = req.method().to_owned();
        let path = req.path().to_owned();

        let response = match self.lookup(&method, &path) {
            Lookup::Found(handler) => {
                match tokio::task::spawn_blocking(move || handler.call(&req)).await {
                    Ok(res) => res,
                    Err(e) => {
                        error!(%method, %path, "handler failed: {e}");
                        Response::error(Status::InternalServerError, "Internal server error")
                    }
                }
            }
            Lookup::MethodNotAllowed(allowed) => {
                let allow = allowed.iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Response::error(Status::MethodNotAllowed, "Method not allowed")
                    .with_header("allow", &allow)
            }
            Lookup::NotFound => Response::error(Status::NotFound, "Not found"),
        };

        debug!(
            %method,
            %path,
            status = u16::from(response.status()),
            elapsed = ?started.elapsed(),
            "request handled"
        );
        response
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
