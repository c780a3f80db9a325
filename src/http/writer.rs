use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::Headers;
use crate::http::request::Request;
use crate::http::response::Response;

/// Serializes a response into its wire form.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let status_line = format!(
        "{} {} {}",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    serialize_message(&status_line, &resp.headers, &resp.body)
}

/// Serializes a request into its wire form.
pub fn serialize_request(req: &Request) -> Vec<u8> {
    let request_line = format!("{} {} {}", req.method, req.path, req.version);
    serialize_message(&request_line, &req.headers, &req.body)
}

fn serialize_message(title: &str, headers: &Headers, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(title.len() + 64 + body.len());

    buf.extend_from_slice(title.as_bytes());
    buf.extend_from_slice(b"\r\n");

    for (k, v) in headers.iter() {
        write_header(&mut buf, k, v);
    }

    // Content-Length is only injected for non-empty bodies
    if !body.is_empty() && !headers.contains("Content-Length") {
        write_header(&mut buf, "Content-Length", &body.len().to_string());
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(body);

    buf
}

fn write_header(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

/// Holds a serialized response and tracks how much of it reached the peer.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.written == self.buffer.len()
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;

        Ok(())
    }

    /// Like [`write_to_stream`](Self::write_to_stream), bounded by an optional timeout.
    pub async fn write_with_timeout<S>(
        &mut self,
        stream: &mut S,
        limit: Option<Duration>,
    ) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        match limit {
            Some(limit) => tokio::time::timeout(limit, self.write_to_stream(stream))
                .await
                .map_err(|_| anyhow::anyhow!("write timeout after {:?}", limit))?,
            None => self.write_to_stream(stream).await,
        }
    }
}
