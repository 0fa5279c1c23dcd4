//! HTTP body handling module for processing message payloads
//!
//! This module decides how a message body is framed and decodes it
//! from a [`ByteSource`](crate::source::ByteSource).
//!
//! # Components
//!
//! - [`framing`]: Picks the framing from the message head (Content-Length,
//!   Transfer-Encoding and the method tables)
//! - [`ChunkedDecoder`]: Handles chunked transfer encoded payloads
//! - [`LengthDecoder`]: Processes fixed-length payloads
//! - [`PayloadDecoder`]: Main decoder that coordinates different decoding strategies

mod chunked_decoder;
pub(crate) mod framing;
mod length_decoder;
mod payload_decoder;

pub use chunked_decoder::{ChunkedDecoder, MAX_CHUNK_LINE_BYTES};
pub use length_decoder::LengthDecoder;
pub use payload_decoder::PayloadDecoder;
