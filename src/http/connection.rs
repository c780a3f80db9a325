use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::Instrument;

use crate::config::ServerConfig;
use crate::handler::Handler;
use crate::http::parser::{declared_content_length, find_headers_end, parse_http_request};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Size and time bounds applied while serving one connection.
#[derive(Debug, Clone)]
pub struct Limits {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for Limits {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            max_header_bytes: cfg.max_header_bytes,
            max_body_bytes: cfg.max_body_bytes,
            read_timeout: cfg.read_timeout(),
            write_timeout: cfg.write_timeout(),
        }
    }
}

/// Serves exactly one request on one socket, then closes it.
pub struct Connection<S = TcpStream> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    handler: Arc<dyn Handler>,
    limits: Limits,
}

pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    Responding(ResponseWriter),
    Closed,
}

/// What the read phase produced.
enum ReadOutcome {
    /// A complete message sits in the buffer
    Message,
    /// Peer closed before sending anything
    Eof,
    /// The request was refused before parsing
    Rejected(StatusCode),
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<dyn Handler>, limits: Limits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            handler,
            limits,
        }
    }

    /// Drives the connection to `Closed`.
    ///
    /// The socket is shut down on every path, including read and write errors,
    /// which are still reported to the caller afterwards.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::trace!(error = %e, "Socket shutdown failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            // Left as Closed if any step below bails out
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await? {
                    ReadOutcome::Eof => ConnectionState::Closed,
                    ReadOutcome::Rejected(status) => {
                        tracing::warn!(status = status.as_u16(), "Request rejected");
                        let response = Response::closing(status, status.to_string());
                        ConnectionState::Responding(ResponseWriter::new(&response))
                    }
                    ReadOutcome::Message => match parse_http_request(&self.buffer) {
                        Ok(req) => ConnectionState::Dispatching(req),
                        Err(e) => {
                            tracing::warn!(error = %e, "Invalid HTTP request");
                            ConnectionState::Responding(ResponseWriter::new(&Response::bad_request()))
                        }
                    },
                },

                ConnectionState::Dispatching(req) => {
                    let response = self.dispatch(req).await;
                    ConnectionState::Responding(ResponseWriter::new(&response))
                }

                ConnectionState::Responding(mut writer) => {
                    writer
                        .write_with_timeout(&mut self.stream, self.limits.write_timeout)
                        .await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    break;
                }
            };
        }

        Ok(())
    }

    /// Runs the root handler on its own task so that both returned errors and
    /// panics turn into a 500.
    async fn dispatch(&self, req: Request) -> Response {
        let method = req.method;
        let path = req.path.clone();
        let handler = Arc::clone(&self.handler);

        let task = tokio::spawn(async move { handler.handle(req).await }.in_current_span());

        match task.await {
            Ok(Ok(response)) => {
                tracing::info!(
                    method = %method,
                    path = %path,
                    status = response.status.as_u16(),
                    "Request handled"
                );
                response
            }
            Ok(Err(e)) => {
                tracing::error!(method = %method, path = %path, error = %e, "Handler failed");
                Response::internal_error()
            }
            Err(e) => {
                tracing::error!(method = %method, path = %path, error = %e, "Handler panicked");
                Response::internal_error()
            }
        }
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            match find_headers_end(&self.buffer) {
                Some(end) if end > self.limits.max_header_bytes => {
                    return Ok(ReadOutcome::Rejected(StatusCode::RequestHeaderFieldsTooLarge));
                }

                Some(end) => {
                    let body_start = end + 4;
                    let declared = match declared_content_length(&self.buffer[..end]) {
                        Ok(declared) => declared,
                        Err(e) => {
                            tracing::warn!(error = %e, "Invalid HTTP request");
                            return Ok(ReadOutcome::Rejected(StatusCode::BadRequest));
                        }
                    };
                    match declared {
                        Some(len) if len > self.limits.max_body_bytes => {
                            return Ok(ReadOutcome::Rejected(StatusCode::PayloadTooLarge));
                        }
                        Some(len) if self.buffer.len() >= body_start + len => {
                            self.buffer.truncate(body_start + len);
                            return Ok(ReadOutcome::Message);
                        }
                        Some(_) => {
                            // Need more body → fall through to read
                        }
                        None if self.buffer.len() - body_start > self.limits.max_body_bytes => {
                            return Ok(ReadOutcome::Rejected(StatusCode::PayloadTooLarge));
                        }
                        None => return Ok(ReadOutcome::Message),
                    }
                }

                None if self.buffer.len() > self.limits.max_header_bytes => {
                    return Ok(ReadOutcome::Rejected(StatusCode::RequestHeaderFieldsTooLarge));
                }

                None => {
                    // Need more headers → fall through to read
                }
            }

            let n = match self.limits.read_timeout {
                Some(limit) => match tokio::time::timeout(limit, self.stream.read_buf(&mut self.buffer)).await {
                    Ok(n) => n?,
                    Err(_) => return Ok(ReadOutcome::Rejected(StatusCode::RequestTimeout)),
                },
                None => self.stream.read_buf(&mut self.buffer).await?,
            };

            if n == 0 {
                // Client closed; whatever arrived is the whole message
                return Ok(if self.buffer.is_empty() {
                    ReadOutcome::Eof
                } else {
                    ReadOutcome::Message
                });
            }
        }
    }
}
