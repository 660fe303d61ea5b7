//! Handler trait and type erasure.
//!
//! # Why handlers are synchronous
//!
//! Every handler in this service is a pure computation over the query
//! string. Some of them (a large factorial, a long Fibonacci run) can take
//! a long time, so they must not run on the async reactor threads. Handlers
//! are therefore plain `Fn(&Request) -> impl IntoResponse` and the router
//! runs them on tokio's blocking pool.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! fn mean(req: &Request) -> Result<Json<_>, ApiError>   ← handler
//!        ↓ router.get("/mean", mean)
//! mean.into_boxed_handler()                             ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(mean))                             ← stored as BoxedHandler
//!        ↓
//! spawn_blocking(move || handler.call(&req))            ← at request time
//! ```

use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: &Request) -> Response;
}

/// A type-erased handler shared across concurrent requests and moved into
/// blocking tasks, hence `Arc` and `Send + Sync + 'static`.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any function or closure with the shape
///
/// ```text
/// fn name(req: &Request) -> impl IntoResponse
/// ```
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, R> private::Sealed for F
where
    F: Fn(&Request) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
}

impl<F, R> Handler for F
where
    F: Fn(&Request) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, R> ErasedHandler for FnHandler<F>
where
    F: Fn(&Request) -> R,
    R: IntoResponse,
{
    fn call(&self, req: &Request) -> Response {
        (self.0)(req).into_response()
    }
}
