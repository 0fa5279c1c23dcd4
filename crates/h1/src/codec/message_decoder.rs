//! HTTP message decoder
//!
//! Reads a message head from a [`ByteSource`] and attaches the body stream the
//! head asks for.
//!
//! # Components
//!
//! - Start-line: parsed with [`parse_start_line`]
//! - Field lines: parsed with [`HeaderDecoder`]
//! - Body framing: resolved from the method tables and the
//!   Content-Length / Transfer-Encoding fields
//!
//! # Example
//!
//! ```no_run
//! use micro_h1::codec::MessageDecoder;
//! use micro_h1::source::MemorySource;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = MemorySource::new("POST /echo HTTP/1.1\r\ncontent-length: 2\r\n\r\nhi");
//! let mut message = MessageDecoder::new().decode(&mut source).await?;
//! if let Some(body) = message.body_mut() {
//!     let bytes = body.collect().await?;
//!     assert_eq!(&bytes[..], b"hi");
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, trace};

use crate::codec::body::framing::{request_payload, response_payload};
use crate::codec::header::{HeaderDecoder, MAX_HEADER_NUM, read_head_line};
use crate::codec::start_line::parse_start_line;
use crate::ensure;
use crate::protocol::{Message, MessageHead, Method, ParseError, PayloadSize};
use crate::source::ByteSource;

/// Size of the buffer a single head line has to fit in
pub const MAX_LINE_BYTES: usize = 1024;

/// A decoder for HTTP messages, requests and responses alike.
///
/// The decoder is stateless between messages: every call reads one head from
/// the source and hands back a [`Message`] whose body stream borrows the
/// source until it is dropped.
#[derive(Debug, Clone, Copy)]
pub struct MessageDecoder {
    max_line_bytes: usize,
    max_headers: usize,
}

impl Default for MessageDecoder {
    fn default() -> Self {
        Self::with_limits(MAX_LINE_BYTES, MAX_HEADER_NUM)
    }
}

impl MessageDecoder {
    /// Creates a decoder with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with a custom line buffer size and field line limit
    pub fn with_limits(max_line_bytes: usize, max_headers: usize) -> Self {
        Self { max_line_bytes, max_headers }
    }

    /// Decodes one message.
    ///
    /// Requests get a body stream whenever their framing says so. Responses
    /// never get one here, use [`decode_response`](Self::decode_response) when
    /// the request method is known.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the head is malformed, exceeds a limit,
    /// or declares a framing that cannot be decoded. No message is produced
    /// and the source must be closed.
    pub async fn decode<'conn, S: ByteSource>(&self, source: &'conn mut S) -> Result<Message<'conn, S>, ParseError> {
        let head = self.decode_head(source).await?;

        let payload_size = match head.method() {
            Some(method) => request_payload(method, head.headers())?,
            None => PayloadSize::Empty,
        };
        debug!(kind = ?head.kind(), payload = ?payload_size, "decoded message head");

        Ok(Message::new(head, payload_size, source))
    }

    /// Decodes a response to a request made with `request_method`.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode), and the start-line must be a
    /// status-line.
    pub async fn decode_response<'conn, S: ByteSource>(
        &self,
        source: &'conn mut S,
        request_method: &Method,
    ) -> Result<Message<'conn, S>, ParseError> {
        let head = self.decode_head(source).await?;
        ensure!(!head.is_request(), ParseError::malformed_headers("expected a status-line"));

        let payload_size = response_payload(request_method, head.headers())?;
        debug!(request_method = %request_method, payload = ?payload_size, "decoded response head");

        Ok(Message::new(head, payload_size, source))
    }

    /// Reads the start-line and the field lines, up to and including the
    /// blank line. Nothing of the body is consumed.
    ///
    /// Only an EOF before the start-line is reported as a closed connection,
    /// a head cut short after it is malformed.
    pub async fn decode_head<S: ByteSource>(&self, source: &mut S) -> Result<MessageHead, ParseError> {
        let mut buf = vec![0u8; self.max_line_bytes];

        let len = match read_head_line(source, &mut buf).await? {
            Some(len) => len,
            None => {
                trace!("skipped empty line before start-line");
                read_head_line(source, &mut buf).await?.ok_or_else(|| ParseError::malformed_headers("empty start-line"))?
            }
        };
        let start_line = parse_start_line(&buf[..len])?;

        let headers = HeaderDecoder::new(self.max_headers).decode(source, &mut buf).await.map_err(|e| {
            if e.is_connection_closed() { ParseError::malformed_headers("connection closed inside message head") } else { e }
        })?;
        Ok(MessageHead::new(start_line, headers))
    }
}
