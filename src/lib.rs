//! Wicket - a minimal asynchronous HTTP server
//!
//! Core library: message codec, prefix router, connection lifecycle and the
//! listening server.

pub mod config;
pub mod handler;
pub mod http;
pub mod router;
pub mod server;

pub use handler::{handler_fn, Handler};
pub use http::request::{Method, Request};
pub use http::response::{Response, StatusCode};
pub use router::Router;
pub use server::Server;
