//! Unified error type.

use thiserror::Error;

/// The error type returned by arith's fallible infrastructure operations.
///
/// Request-level failures (bad input, unknown route) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// startup and I/O failures: loading configuration, binding a port,
/// accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
