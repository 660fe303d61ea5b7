//! # arith
//!
//! A tiny JSON-over-HTTP service with three endpoints:
//!
//! - `GET /factorial?n=5` → `{"factorial":120}`
//! - `GET /fibonacci?limit=5` → `{"fibonacci":[0,1,1,2,3]}`
//! - `GET /mean?numbers=1,2,3` → `{"mean":2.0}`
//!
//! Bad input is answered with `400` and `{"error": "..."}`, unknown paths
//! with `404`, other methods on known paths with `405`.
//!
//! The crate is split in two layers. The bottom one is a small hyper-based
//! framework: [`Router`] (radix-tree routing per method), [`Request`],
//! [`Response`], [`Server`] (accept loop + graceful shutdown). The top one
//! is [`api`], the three handlers, built on the pure functions in [`math`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use arith::{api, Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), arith::Error> {
//!     let config = Config::default();
//!     Server::bind(config.socket_addr()?)
//!         .await?
//!         .serve(api::router(config.limits))
//!         .await
//! }
//! ```
//!
//! Handlers are synchronous and run on the blocking pool, so an expensive
//! computation never stalls the reactor:
//!
//! ```rust
//! use arith::{Json, Request, Router};
//!
//! fn hello(req: &Request) -> Json<String> {
//!     Json(format!("hello {}", req.query_or("name", "world")))
//! }
//!
//! let app = Router::new().get("/hello", hello);
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod math;
pub mod query;
pub mod telemetry;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
