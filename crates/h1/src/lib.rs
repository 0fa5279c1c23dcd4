//! An asynchronous HTTP/1.1 message framing library
//!
//! This crate reads HTTP/1.1 messages off a byte connection: it parses the
//! start-line and the header fields, decides how the body is framed, and hands
//! the body back as a stream that decodes fixed-length and chunked payloads
//! on demand. It is built on top of tokio.
//!
//! # Features
//!
//! - Request-line and status-line parsing
//! - Header fields stored lowercased, with comma separated values split
//! - Content-Length and chunked Transfer-Encoding bodies
//! - One pull-based [`source::ByteSource`] abstraction, with a live
//!   connection variant and an in-memory variant sharing the same semantics
//! - A minimal one-request-per-connection server glue
//!
//! # Example
//!
//! ```no_run
//! use std::error::Error;
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use http::StatusCode;
//! use micro_h1::connection::HttpConnection;
//! use micro_h1::handler::make_handler;
//! use micro_h1::protocol::{MessageHead, ResponseHead, status_response};
//! use micro_h1::source::ConnSource;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:3000").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = Arc::clone(&handler);
//!         tokio::spawn(async move {
//!             let mut connection = HttpConnection::new(ConnSource::new(tcp_stream));
//!             if let Err(e) = connection.process(handler).await {
//!                 error!(cause = %e, "request failed");
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello(head: MessageHead, body: Bytes) -> Result<ResponseHead, Box<dyn Error + Send + Sync>> {
//!     info!(target = ?head.target(), body_len = body.len(), "receiving request");
//!     Ok(status_response(StatusCode::OK))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`source`]: Byte-level access to a connection
//! - [`codec`]: Start-line, header field and body decoding, reply encoding
//! - [`protocol`]: Messages, heads, body streams and errors
//! - [`handler`]: Request handler trait
//! - [`connection`]: Serving one request on one connection
//!
//! # Error Handling
//!
//! - [`protocol::ParseError`]: the head is malformed; no message is produced
//! - [`protocol::BodyError`]: the body is malformed or truncated; the stream
//!   must be closed
//! - [`protocol::SendError`]: the reply could not be written
//! - [`protocol::HttpError`]: any of the above
//!
//! All of them are terminal for the connection.
//!
//! # Limitations
//!
//! - HTTP/1.x only, one request per connection
//! - Chunked trailer fields are not consumed
//! - Repeated header fields replace earlier ones instead of being combined
//! - Maximum head line size: 1KB by default
//! - Maximum number of header fields: 64 by default

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod source;

mod utils;
pub(crate) use utils::ensure;
