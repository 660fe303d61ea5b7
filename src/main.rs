//! `arith [CONFIG_PATH]`
//!
//! Serves `/factorial`, `/fibonacci` and `/mean` until SIGTERM or Ctrl-C.
//! `CONFIG_PATH` defaults to `arith.toml`; a missing file is not an error.
//!
//! Try:
//!   curl 'http://127.0.0.1:8000/factorial?n=5'
//!   curl 'http://127.0.0.1:8000/fibonacci?limit=8'
//!   curl 'http://127.0.0.1:8000/mean?numbers=1,2,3.5'

use arith::{api, telemetry, Config, Error, Server};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "arith.toml".to_owned());
    let config = Config::load_from(&path)?;

    telemetry::init(&config.logging);

    if config.limits.max_factorial.is_none() || config.limits.max_fibonacci.is_none() {
        tracing::warn!(
            limits = ?config.limits,
            "input limits are not fully configured; large requests can exhaust CPU and memory"
        );
    }

    Server::bind(config.socket_addr()?)
        .await?
        .serve(api::router(config.limits))
        .await
}
