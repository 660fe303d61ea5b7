//! Incoming HTTP request type.

use std::collections::HashMap;

use crate::query;

/// An incoming request as handlers see it: method, path, and the parsed
/// query string. Handlers here never look at headers or bodies, so those
/// are not carried.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    query: HashMap<String, String>,
}

impl Request {
    /// Builds a request from a method token and a request target
    /// (`/path?query`).
    ///
    /// ```rust
    /// use arith::Request;
    ///
    /// let req = Request::new("GET", "/factorial?n=5");
    /// assert_eq!(req.path(), "/factorial");
    /// assert_eq!(req.query("n"), Some("5"));
    /// ```
    pub fn new(method: impl Into<String>, target: &str) -> Self {
        let (path, raw_query) = target.split_once('?').unwrap_or((target, ""));
        Self {
            method: method.into(),
            path: path.to_owned(),
            query: query::parse(raw_query),
        }
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Returns a query parameter's value, if present.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns a query parameter's value, or `default` when it is absent.
    ///
    /// A parameter that is present but empty (`?n=`) is *not* absent.
    pub fn query_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.query(key).unwrap_or(default)
    }
}
