use bytes::Bytes;

use crate::protocol::body::BodyStream;
use crate::protocol::{Headers, HttpVersion, MessageHead, MessageKind, Method};
use crate::source::ByteSource;

/// A parsed HTTP message: its head and, when one is expected, its body.
///
/// The body stream borrows the connection it reads from, so the message has
/// to be dropped before the connection is used for anything else.
#[derive(Debug)]
pub struct Message<'conn, S> {
    head: MessageHead,
    body: Option<BodyStream<'conn, S>>,
}

impl<'conn, S> Message<'conn, S>
where
    S: ByteSource,
{
    pub(crate) fn new(head: MessageHead, payload_size: PayloadSize, source: &'conn mut S) -> Self {
        let body = match payload_size {
            PayloadSize::Empty => None,
            PayloadSize::Length(length) => Some(BodyStream::fixed_length(source, length)),
            PayloadSize::Chunked => Some(BodyStream::chunked(source)),
        };
        Self { head, body }
    }

    pub fn head(&self) -> &MessageHead {
        &self.head
    }

    pub fn kind(&self) -> MessageKind {
        self.head.kind()
    }

    pub fn method(&self) -> Option<&Method> {
        self.head.method()
    }

    pub fn version(&self) -> HttpVersion {
        self.head.version()
    }

    pub fn headers(&self) -> &Headers {
        self.head.headers()
    }

    /// The body stream, `None` when no body is expected for this message.
    pub fn body(&self) -> Option<&BodyStream<'conn, S>> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut BodyStream<'conn, S>> {
        self.body.as_mut()
    }

    pub fn into_parts(self) -> (MessageHead, Option<BodyStream<'conn, S>>) {
        (self.head, self.body)
    }
}

/// Represents an item in the HTTP message payload stream.
///
/// Produced by [`BodyStream::next_item`]: either data chunks or the end of the
/// payload stream (EOF).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    /// A chunk of payload data
    Chunk(Bytes),
    /// Marks the end of the payload stream
    Eof,
}

/// Represents how the body of a message is framed.
///
/// - Known length: Process exact number of bytes
/// - Chunked: Process using chunked transfer encoding
/// - Empty: No body expected
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked,
    /// Empty payload (no body)
    Empty,
}
