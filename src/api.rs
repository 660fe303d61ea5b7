//! The three endpoints: `/factorial`, `/fibonacci`, `/mean`.
//!
//! Each handler reads its query parameter, validates it into an
//! [`ApiError`] on failure, and hands the value to [`crate::math`].
//! Every answer is a JSON object with exactly one key: the result key on
//! success, `error` otherwise.
//!
//! | Path | Param | Default | Success |
//! |---|---|---|---|
//! | `/factorial` | `n` | `0` | `{"factorial": <int>}` |
//! | `/fibonacci` | `limit` | `10` | `{"fibonacci": [<int>, ...]}` |
//! | `/mean` | `numbers` | *(empty)* | `{"mean": <float>}` |

use std::num::IntErrorKind;

use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use thiserror::Error;

use crate::config::LimitsConfig;
use crate::math;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;

/// Builds the service's router.
pub fn router(limits: LimitsConfig) -> Router {
    Router::new()
        .get("/factorial", move |req: &Request| factorial(req, &limits))
        .get("/fibonacci", move |req: &Request| fibonacci(req, &limits))
        .get("/mean", mean)
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// A rejected request. The `Display` text is the JSON `error` message.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Number must be non-negative")]
    NegativeNumber,
    #[error("Number must be an integer")]
    InvalidNumber,
    #[error("Number must not exceed {0}")]
    NumberTooLarge(u64),

    #[error("Limit must be non-negative")]
    NegativeLimit,
    #[error("Limit must be an integer")]
    InvalidLimit,
    #[error("Limit must not exceed {0}")]
    LimitTooLarge(u64),

    #[error("Invalid input, must be a comma-separated list of numbers")]
    InvalidNumbers,
}

impl ApiError {
    /// All validation failures are the client's fault.
    pub fn status(self) -> Status {
        Status::BadRequest
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Response::error(self.status(), &self.to_string())
    }
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// An exact integer, serialised as a bare JSON number of any length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigNumber(pub BigUint);

impl Serialize for BigNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.0.to_string()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

#[derive(Debug, Serialize)]
pub struct FactorialBody {
    pub factorial: BigNumber,
}

#[derive(Debug, Serialize)]
pub struct FibonacciBody {
    pub fibonacci: Vec<BigNumber>,
}

#[derive(Debug, Serialize)]
pub struct MeanBody {
    pub mean: f64,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /factorial?n=<int>`
pub fn factorial(req: &Request, limits: &LimitsConfig) -> Result<Json<FactorialBody>, ApiError> {
    let n = parse_count(req.query_or("n", "0"), limits.max_factorial).map_err(|e| match e {
        CountError::Negative => ApiError::NegativeNumber,
        CountError::NotInteger => ApiError::InvalidNumber,
        CountError::TooLarge(max) => ApiError::NumberTooLarge(max),
    })?;
    Ok(Json(FactorialBody { factorial: BigNumber(math::factorial(n)) }))
}

/// `GET /fibonacci?limit=<int>`
pub fn fibonacci(req: &Request, limits: &LimitsConfig) -> Result<Json<FibonacciBody>, ApiError> {
    let limit = parse_count(req.query_or("limit", "10"), limits.max_fibonacci).map_err(|e| match e {
        CountError::Negative => ApiError::NegativeLimit,
        CountError::NotInteger => ApiError::InvalidLimit,
        CountError::TooLarge(max) => ApiError::LimitTooLarge(max),
    })?;
    let fibonacci = math::fibonacci(limit).into_iter().map(BigNumber).collect();
    Ok(Json(FibonacciBody { fibonacci }))
}

/// `GET /mean?numbers=<float>,<float>,...`
pub fn mean(req: &Request) -> Result<Json<MeanBody>, ApiError> {
    let values = req.query_or("numbers", "")
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ApiError::InvalidNumbers)?;
    let mean = math::mean(&values).ok_or(ApiError::InvalidNumbers)?;
    Ok(Json(MeanBody { mean }))
}

// ── Input parsing ─────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum CountError {
    Negative,
    NotInteger,
    TooLarge(u64),
}

/// Parses a non-negative integer, optionally bounded by `max`.
///
/// Surrounding whitespace and a leading `+` are accepted. Values beyond
/// `u64` are reported as too large (or negative, if they are).
fn parse_count(raw: &str, max: Option<u64>) -> Result<u64, CountError> {
    let ceiling = max.unwrap_or(u64::MAX);
    let value = raw.trim().parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::NegOverflow => CountError::Negative,
        IntErrorKind::PosOverflow => CountError::TooLarge(ceiling),
        _ => CountError::NotInteger,
    })?;
    if value < 0 {
        return Err(CountError::Negative);
    }
    match u64::try_from(value) {
        Ok(n) if n <= ceiling => Ok(n),
        _ => Err(CountError::TooLarge(ceiling)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(res: impl IntoResponse) -> (Status, String) {
        let res = res.into_response();
        let text = String::from_utf8(res.body().to_vec()).expect("utf-8 body");
        (res.status(), text)
    }

    fn get(target: &str) -> Request {
        Request::new("GET", target)
    }

    const UNBOUNDED: LimitsConfig = LimitsConfig { max_factorial: None, max_fibonacci: None };

    #[test]
    fn parse_count_cases() {
        assert_eq!(parse_count("5", None), Ok(5));
        assert_eq!(parse_count(" +7 ", None), Ok(7));
        assert_eq!(parse_count("-0", None), Ok(0));
        assert_eq!(parse_count("-1", None), Err(CountError::Negative));
        assert_eq!(parse_count("", None), Err(CountError::NotInteger));
        assert_eq!(parse_count("1.5", None), Err(CountError::NotInteger));
        assert_eq!(parse_count("abc", None), Err(CountError::NotInteger));
        assert_eq!(parse_count("1_0", None), Err(CountError::NotInteger));
        assert_eq!(parse_count("11", Some(10)), Err(CountError::TooLarge(10)));
        assert_eq!(parse_count("10", Some(10)), Ok(10));
    }

    #[test]
    fn parse_count_out_of_range() {
        let huge = "9".repeat(60);
        assert_eq!(parse_count(&huge, None), Err(CountError::TooLarge(u64::MAX)));
        assert_eq!(parse_count(&format!("-{huge}"), None), Err(CountError::Negative));
        assert_eq!(
            parse_count("18446744073709551616", None),
            Err(CountError::TooLarge(u64::MAX)),
        );
    }

    #[test]
    fn factorial_responses() {
        assert_eq!(
            body(factorial(&get("/factorial?n=5"), &UNBOUNDED)),
            (Status::Ok, r#"{"factorial":120}"#.to_owned()),
        );
        assert_eq!(
            body(factorial(&get("/factorial"), &UNBOUNDED)),
            (Status::Ok, r#"{"factorial":1}"#.to_owned()),
        );
        assert_eq!(
            body(factorial(&get("/factorial?n=-1"), &UNBOUNDED)),
            (Status::BadRequest, r#"{"error":"Number must be non-negative"}"#.to_owned()),
        );
        assert_eq!(
            body(factorial(&get("/factorial?n=x"), &UNBOUNDED)),
            (Status::BadRequest, r#"{"error":"Number must be an integer"}"#.to_owned()),
        );
    }

    #[test]
    fn factorial_is_exact() {
        assert_eq!(
            body(factorial(&get("/factorial?n=25"), &UNBOUNDED)).1,
            r#"{"factorial":15511210043330985984000000}"#,
        );
    }

    #[test]
    fn factorial_respects_limit() {
        let limits = LimitsConfig { max_factorial: Some(100), ..UNBOUNDED };
        assert!(factorial(&get("/factorial?n=100"), &limits).is_ok());
        assert_eq!(
            factorial(&get("/factorial?n=101"), &limits).unwrap_err(),
            ApiError::NumberTooLarge(100),
        );
        assert_eq!(
            ApiError::NumberTooLarge(100).to_string(),
            "Number must not exceed 100",
        );
    }

    #[test]
    fn fibonacci_responses() {
        assert_eq!(
            body(fibonacci(&get("/fibonacci?limit=5"), &UNBOUNDED)),
            (Status::Ok, r#"{"fibonacci":[0,1,1,2,3]}"#.to_owned()),
        );
        assert_eq!(
            body(fibonacci(&get("/fibonacci?limit=0"), &UNBOUNDED)).1,
            r#"{"fibonacci":[]}"#,
        );
        assert_eq!(
            body(fibonacci(&get("/fibonacci?limit=1"), &UNBOUNDED)).1,
            r#"{"fibonacci":[0]}"#,
        );
        assert_eq!(
            body(fibonacci(&get("/fibonacci"), &UNBOUNDED)).1,
            r#"{"fibonacci":[0,1,1,2,3,5,8,13,21,34]}"#,
        );
        assert_eq!(
            body(fibonacci(&get("/fibonacci?limit=-3"), &UNBOUNDED)),
            (Status::BadRequest, r#"{"error":"Limit must be non-negative"}"#.to_owned()),
        );
        assert_eq!(
            fibonacci(&get("/fibonacci?limit=ten"), &UNBOUNDED).unwrap_err(),
            ApiError::InvalidLimit,
        );
    }

    #[test]
    fn fibonacci_respects_limit() {
        let limits = LimitsConfig { max_fibonacci: Some(3), ..UNBOUNDED };
        assert_eq!(
            fibonacci(&get("/fibonacci"), &limits).unwrap_err(),
            ApiError::LimitTooLarge(3),
        );
    }

    #[test]
    fn mean_responses() {
        assert_eq!(
            body(mean(&get("/mean?numbers=1,2,3"))),
            (Status::Ok, r#"{"mean":2.0}"#.to_owned()),
        );
        assert_eq!(body(mean(&get("/mean?numbers=1.5, 2.5"))).1, r#"{"mean":2.0}"#);
        assert_eq!(body(mean(&get("/mean?numbers=-4"))).1, r#"{"mean":-4.0}"#);
    }

    #[test]
    fn mean_rejects_bad_lists() {
        let expected = (
            Status::BadRequest,
            r#"{"error":"Invalid input, must be a comma-separated list of numbers"}"#.to_owned(),
        );
        for target in [
            "/mean",
            "/mean?numbers=",
            "/mean?numbers=1,a,3",
            "/mean?numbers=1,,3",
            "/mean?numbers=1_000",
            "/mean?numbers=nan",
            "/mean?numbers=1,inf",
        ] {
            assert_eq!(body(mean(&get(target))), expected, "{target}");
        }
    }

    #[test]
    fn identical_queries_give_identical_bytes() {
        let a = body(fibonacci(&get("/fibonacci?limit=30"), &UNBOUNDED));
        let b = body(fibonacci(&get("/fibonacci?limit=30"), &UNBOUNDED));
        assert_eq!(a, b);
    }
}
