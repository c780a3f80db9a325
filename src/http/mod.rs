//! HTTP protocol implementation.
//!
//! One request per connection: the socket is read until a complete message is
//! buffered, the message is dispatched to the root handler, the response is
//! written and the socket is closed.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine
//! - **`parser`**: parses requests and responses from byte buffers
//! - **`writer`**: serializes requests and responses, writes responses to the client
//! - **`headers`**: ordered, case-insensitive header collection
//! - **`request`**: HTTP request representation and the method table
//! - **`response`**: HTTP response representation and the status table
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete message
//!        └──────┬──────┘
//!               │ parsed            │ malformed / too large / timeout
//!               ▼                   │ (400 / 413 / 431 / 408)
//!        ┌──────────────────┐       │
//!        │   Dispatching    │       │ ← Root handler (500 on error or panic)
//!        └──────┬───────────┘       │
//!               ▼                   │
//!        ┌──────────────────┐       │
//!        │   Responding     │ ◄─────┘ ← Send response to client
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Reached on every path, also straight from
//!        └──────────────────┘   Reading when the peer sent nothing
//! ```

pub mod headers;
pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
