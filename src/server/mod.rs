//! Listening server with a start/stop lifecycle.

pub mod listener;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, Instrument, Span};

use crate::config::ServerConfig;
use crate::handler::Handler;
use crate::http::connection::Limits;

/// An HTTP server serving one root [`Handler`].
///
/// # Example
///
/// ```no_run
/// use wicket::handler::handler_fn;
/// use wicket::http::request::Request;
/// use wicket::http::response::Response;
/// use wicket::router::Router;
/// use wicket::server::Server;
///
/// async fn hello(_req: Request) -> anyhow::Result<Response> {
///     Ok(Response::ok("hi"))
/// }
///
/// # async fn run() -> anyhow::Result<()> {
/// let mut router = Router::new();
/// router.add_route("/hello", handler_fn(hello));
///
/// let mut server = Server::new(router, "127.0.0.1", 8080);
/// server.start().await?;
/// // ...
/// server.stop().await;
/// # Ok(())
/// # }
/// ```
pub struct Server {
    handler: Arc<dyn Handler>,
    config: ServerConfig,
    span: Span,
    running: Option<Running>,
}

struct Running {
    shutdown: broadcast::Sender<()>,
    task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl Server {
    pub fn new(handler: impl Handler + 'static, host: impl Into<String>, port: u16) -> Self {
        let config = ServerConfig {
            host: host.into(),
            port,
            ..ServerConfig::default()
        };
        Self::with_config(handler, config)
    }

    pub fn with_config(handler: impl Handler + 'static, config: ServerConfig) -> Self {
        Self {
            handler: Arc::new(handler),
            config,
            span: tracing::info_span!("server"),
            running: None,
        }
    }

    /// Sets the span that the accept loop and all connection tasks log under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Binds the listening socket and starts accepting. Does nothing if the
    /// server is already running.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        if self.running.is_some() {
            return Ok(());
        }

        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        let local_addr = listener.local_addr()?;

        let (shutdown, rx) = broadcast::channel(1);
        let task = tokio::spawn(
            listener::run(
                listener,
                Arc::clone(&self.handler),
                Limits::from(&self.config),
                self.config.shutdown_grace(),
                rx,
            )
            .instrument(self.span.clone()),
        );

        self.span.in_scope(|| info!("Server started on {}", local_addr));

        self.running = Some(Running {
            shutdown,
            task,
            local_addr,
        });
        Ok(())
    }

    /// Stops accepting, releases the listening socket and waits for in-flight
    /// connections to finish. Connections still open after
    /// [`ServerConfig::shutdown_grace_secs`] are aborted. Does nothing if the
    /// server is not running.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        let _ = running.shutdown.send(());
        if let Err(e) = running.task.await {
            self.span.in_scope(|| tracing::error!("Accept loop failed: {}", e));
        }

        self.span.in_scope(|| info!("Server stopped"));
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// The bound address while running; useful when binding port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.local_addr)
    }
}
