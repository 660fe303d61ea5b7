//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Every response this service sends is JSON. A [`Response`] is written in
//! two phases: the head (status + headers, always including
//! `content-type: application/json`) and then the body. Handlers build one
//! with [`Response::json`] / [`Response::error`], or return a [`Json`] value
//! and let [`IntoResponse`] do it.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http_body_util::Full;
use serde::Serialize;
use tracing::{error, warn};

use crate::status::Status;

const JSON: &str = "application/json";

/// Body used when serialisation itself fails. Kept as a literal so the
/// fallback path cannot fail.
const INTERNAL_ERROR_BODY: &[u8] = br#"{"error":"Internal server error"}"#;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing JSON response.
///
/// ```rust
/// use arith::{Response, Status};
///
/// let res = Response::error(Status::BadRequest, "Limit must be non-negative");
/// assert_eq!(res.status(), Status::BadRequest);
/// assert_eq!(res.body(), br#"{"error":"Limit must be non-negative"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    status: Status,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Serialises `value` as the body. Falls back to a 500 error body if
    /// serialisation fails.
    pub fn json<T: Serialize + ?Sized>(status: Status, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::raw(status, body),
            Err(e) => {
                error!("response serialisation failed: {e}");
                Self::raw(Status::InternalServerError, INTERNAL_ERROR_BODY.to_vec())
            }
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: Status, message: &str) -> Self {
        Self::json(status, &ErrorBody { error: message })
    }

    /// Appends an extra header. `content-type` is always present already.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn status(&self) -> Status { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn raw(status: Status, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![("content-type".to_owned(), JSON.to_owned())],
            body,
        }
    }

    /// Converts into the hyper representation. hyper writes the head before
    /// the body and derives `content-length` from the full body.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status.into();

        let headers = res.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => { headers.append(name, value); }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── Json ──────────────────────────────────────────────────────────────────────

/// A `200 OK` JSON body. Return it from a handler to have it serialised.
///
/// ```rust
/// use arith::{IntoResponse, Json, Status};
///
/// #[derive(serde::Serialize)]
/// struct Mean { mean: f64 }
///
/// let res = Json(Mean { mean: 2.0 }).into_response();
/// assert_eq!(res.status(), Status::Ok);
/// assert_eq!(res.body(), br#"{"mean":2.0}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implemented for [`Response`], [`Json<T>`], and `Result<T, E>` where both
/// sides convert, so handlers can use `?` on their validation errors.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response { Response::json(Status::Ok, &self.0) }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}
