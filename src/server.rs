//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Asks every open connection to close: idle keep-alive connections
//!    close at once, a connection mid-request closes after its response.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::request::Request;
use crate::router::Router;

/// The HTTP server. Owns a bound listener.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds `addr`. Port `0` picks an ephemeral port; see
    /// [`local_addr`](Server::local_addr).
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), arith::Error> {
    /// use arith::{api, config::LimitsConfig, Server};
    ///
    /// Server::bind("127.0.0.1:8000".parse().unwrap())
    ///     .await?
    ///     .serve(api::router(LimitsConfig::default()))
    ///     .await
    /// # }
    /// ```
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until SIGTERM or Ctrl-C, then drains in-flight connections.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves until `signal` resolves, then drains in-flight connections.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let addr = self.local_addr()?;
        let router = Arc::new(router);

        info!(%addr, "arith listening");

        let builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal immediately stops
                // accepting, even if more connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(&router, req).await }
                    });

                    // HTTP/1.1 and HTTP/2, whichever the client speaks. The
                    // watcher lets shutdown close idle keep-alive connections
                    // and finish the ones mid-request.
                    let conn = builder.serve_connection(TokioIo::new(stream), svc);
                    let conn = graceful.watch(conn.into_owned());

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(self.listener);
        graceful.shutdown().await;
        while tasks.join_next().await.is_some() {}

        info!("arith stopped");
        Ok(())
    }
}

/// Routes one hyper request. Infallible: every failure is already a
/// JSON response by the time it gets here.
async fn dispatch(
    router: &Router,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let target = req.uri().path_and_query().map_or("/", |pq| pq.as_str());
    let request = Request::new(req.method().as_str(), target);
    Ok(router.handle(request).await.into_inner())
}

/// Resolves on the first shutdown signal the process receives.
///
/// SIGTERM and SIGINT on Unix, Ctrl-C elsewhere. If a handler cannot be
/// installed that arm never resolves, and the error is logged.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
