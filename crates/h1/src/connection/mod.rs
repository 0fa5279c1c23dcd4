//! HTTP connection handling
//!
//! This module glues the decoder, a [`Handler`](crate::handler::Handler) and
//! the reply encoder together for one accepted connection.
//!
//! # Components
//!
//! - [`HttpConnection`]: Serves a single request on a [`ByteSource`](crate::source::ByteSource):
//!   - Replies `400 Bad Request` to a malformed head
//!   - Closes without a reply when the body is malformed
//!   - Replies `500 Internal Server Error` when the handler fails
//!   - Always closes the connection afterwards

mod http_connection;

pub use http_connection::HttpConnection;
