//! HTTP status codes as a typed enum.
//!
//! Only the statuses this service actually produces are listed. Anything
//! else would be dead weight.
//!
//! ```rust
//! use arith::{Response, Status};
//!
//! let res = Response::error(Status::NotFound, "Not found");
//! assert_eq!(res.status(), Status::NotFound);
//! assert_eq!(u16::from(Status::BadRequest), 400);
//! ```

/// A status code this service can respond with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    Ok,                  // 200
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> Self {
        match s {
            Status::Ok                  => Self::OK,
            Status::BadRequest          => Self::BAD_REQUEST,
            Status::NotFound            => Self::NOT_FOUND,
            Status::MethodNotAllowed    => Self::METHOD_NOT_ALLOWED,
            Status::InternalServerError => Self::INTERNAL_SERVER_ERROR,
        }
    }
}
