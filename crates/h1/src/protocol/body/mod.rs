//! HTTP message body handling.
//!
//! A body is read straight from the connection it arrived on, through a
//! [`BodyStream`] that borrows the connection's [`ByteSource`](crate::source::ByteSource).
//!
//! # Architecture
//!
//! The stream hides how the body is framed. Fixed-length and chunked bodies
//! are decoded by a [`PayloadDecoder`](crate::codec::PayloadDecoder) and
//! callers only see `read`, `write` and `close`.
//!
//! # Ownership
//!
//! The stream holds the only mutable borrow of the connection while the
//! message is alive, so reads from one body can never interleave with reads
//! from anything else on the same connection.

mod body_stream;

pub use body_stream::BodyStream;
