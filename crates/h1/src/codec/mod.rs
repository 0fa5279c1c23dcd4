//! HTTP/1.1 framing codec
//!
//! This module turns bytes pulled from a [`ByteSource`](crate::source::ByteSource)
//! into messages, and reply heads into bytes.
//!
//! # Architecture
//!
//! - Message decoding:
//!   - [`MessageDecoder`]: Reads a message head and attaches its body stream
//!   - Start-line parsing via [`parse_start_line`]
//!   - Field line parsing via [`HeaderDecoder`]
//!   - Body decoding via [`PayloadDecoder`], which drives either a
//!     [`LengthDecoder`] or a [`ChunkedDecoder`]
//!
//! - Reply encoding:
//!   - [`ResponseEncoder`]: Serializes a reply head
//!
//! # Example
//!
//! ```no_run
//! use micro_h1::codec::MessageDecoder;
//! use micro_h1::source::MemorySource;
//!
//! # async fn run() -> Result<(), micro_h1::protocol::ParseError> {
//! let mut source = MemorySource::new("HTTP/1.1 204 No Content\r\n\r\n");
//! let message = MessageDecoder::new().decode(&mut source).await?;
//! assert!(message.body().is_none());
//! # Ok(())
//! # }
//! ```

mod body;
mod header;
mod message_decoder;
mod response_encoder;
mod start_line;

pub use body::{ChunkedDecoder, LengthDecoder, MAX_CHUNK_LINE_BYTES, PayloadDecoder};
pub use header::{HeaderDecoder, MAX_HEADER_NUM, parse_field_line};
pub use message_decoder::{MAX_LINE_BYTES, MessageDecoder};
pub use response_encoder::ResponseEncoder;
pub use start_line::parse_start_line;
