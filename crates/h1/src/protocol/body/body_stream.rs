use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::codec::PayloadDecoder;
use crate::protocol::{BodyError, PayloadItem, SendError};
use crate::source::ByteSource;

/// Size of the buffer used by [`BodyStream::next_item`]
const ITEM_BUF_SIZE: usize = 8 * 1024;

/// The body of a message, read directly from its connection.
///
/// Both framings (fixed length and chunked) are served through the same
/// methods. Once [`is_finished`](Self::is_finished) returns true every read
/// yields `Ok(0)`.
///
/// After a [`BodyError`] the stream is in an undefined state, the only thing
/// left to do is [`close`](Self::close) it.
#[derive(Debug)]
pub struct BodyStream<'conn, S> {
    source: &'conn mut S,
    decoder: PayloadDecoder,
    finished: bool,
}

impl<'conn, S> BodyStream<'conn, S>
where
    S: ByteSource,
{
    pub(crate) fn fixed_length(source: &'conn mut S, length: u64) -> Self {
        Self::new(source, PayloadDecoder::fix_length(length))
    }

    pub(crate) fn chunked(source: &'conn mut S) -> Self {
        Self::new(source, PayloadDecoder::chunked())
    }

    fn new(source: &'conn mut S, decoder: PayloadDecoder) -> Self {
        let finished = decoder.is_finished();
        Self { source, decoder, finished }
    }

    /// Returns true once the whole body has been delivered.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_chunked(&self) -> bool {
        self.decoder.is_chunked()
    }

    /// Reads the next piece of the body into `buf`.
    ///
    /// Returns the number of bytes written into `buf`; `Ok(0)` means the body
    /// is finished (or `buf` is empty). A short read is not the end of the
    /// body, keep reading until `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Returns a [`BodyError`] if the chunked framing is invalid or the
    /// connection ends before the body is complete.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, BodyError> {
        if self.finished || buf.is_empty() {
            return Ok(0);
        }

        let n = self.decoder.decode(&mut *self.source, buf).await?;
        if n == 0 || self.decoder.is_finished() {
            trace!(chunked = self.decoder.is_chunked(), "body finished");
            self.finished = true;
        }
        Ok(n)
    }

    /// Reads the next piece of the body as an owned [`PayloadItem`].
    ///
    /// Returns [`PayloadItem::Eof`] once the body is finished, and on every
    /// call after that.
    pub async fn next_item(&mut self) -> Result<PayloadItem, BodyError> {
        let mut buf = BytesMut::zeroed(ITEM_BUF_SIZE);
        let n = self.read(&mut buf).await?;
        if n == 0 {
            return Ok(PayloadItem::Eof);
        }

        buf.truncate(n);
        Ok(PayloadItem::Chunk(buf.freeze()))
    }

    /// Reads the rest of the body into one buffer.
    pub async fn collect(&mut self) -> Result<Bytes, BodyError> {
        let mut body = BytesMut::new();
        while let PayloadItem::Chunk(bytes) = self.next_item().await? {
            body.extend_from_slice(&bytes);
        }
        Ok(body.freeze())
    }

    /// Writes to the connection the body is read from.
    ///
    /// Meant for sending the reply once the body has been consumed.
    pub async fn write(&mut self, buf: &[u8]) -> Result<usize, SendError> {
        self.source.write(buf).await.map_err(SendError::io)
    }

    pub async fn flush(&mut self) -> Result<(), SendError> {
        self.source.flush().await.map_err(SendError::io)
    }

    /// Closes the underlying connection. Closing more than once is a no-op.
    pub async fn close(&mut self) -> Result<(), SendError> {
        self.source.close().await.map_err(SendError::io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[tokio::test]
    async fn fixed_length_read() {
        let mut source = MemorySource::new("hello worldNEXT");
        let mut body = BodyStream::fixed_length(&mut source, 11);

        let mut buf = [0u8; 4];
        let mut out = Vec::new();
        loop {
            let n = body.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }

        assert_eq!(out, b"hello world");
        assert!(body.is_finished());
        assert_eq!(body.read(&mut buf).await.unwrap(), 0);
        assert_eq!(source.remaining(), b"NEXT");
    }

    #[tokio::test]
    async fn finished_as_soon_as_length_is_delivered() {
        let mut source = MemorySource::new("abc");
        let mut body = BodyStream::fixed_length(&mut source, 3);

        let mut buf = [0u8; 8];
        assert_eq!(body.read(&mut buf).await.unwrap(), 3);
        assert!(body.is_finished());
    }

    #[tokio::test]
    async fn zero_length_body() {
        let mut source = MemorySource::new("rest");
        let mut body = BodyStream::fixed_length(&mut source, 0);

        assert!(body.is_finished());
        assert_eq!(body.next_item().await.unwrap(), PayloadItem::Eof);
        assert_eq!(source.remaining(), b"rest");
    }

    #[tokio::test]
    async fn chunked_items() {
        let mut source = MemorySource::new("3\r\nfoo\r\n4\r\nbarz\r\n0\r\n");
        let mut body = BodyStream::chunked(&mut source);

        assert_eq!(body.next_item().await.unwrap(), PayloadItem::Chunk(Bytes::from_static(b"foo")));
        assert_eq!(body.next_item().await.unwrap(), PayloadItem::Chunk(Bytes::from_static(b"barz")));
        assert!(!body.is_finished());
        assert_eq!(body.next_item().await.unwrap(), PayloadItem::Eof);
        assert!(body.is_finished());
        assert_eq!(body.next_item().await.unwrap(), PayloadItem::Eof);
    }

    #[tokio::test]
    async fn empty_buffer_reads_nothing() {
        let mut source = MemorySource::new("abc");
        let mut body = BodyStream::fixed_length(&mut source, 3);

        assert_eq!(body.read(&mut []).await.unwrap(), 0);
        assert!(!body.is_finished());
        assert_eq!(&body.collect().await.unwrap()[..], b"abc");
    }

    #[tokio::test]
    async fn truncated_body() {
        let mut source = MemorySource::new("ab");
        let mut body = BodyStream::fixed_length(&mut source, 5);

        let err = body.collect().await.unwrap_err();
        assert!(matches!(err, BodyError::UnexpectedEof));
    }

    #[tokio::test]
    async fn write_and_close() {
        let mut source = MemorySource::new("0\r\n");
        let mut body = BodyStream::chunked(&mut source);

        assert!(body.collect().await.unwrap().is_empty());
        assert_eq!(body.write(b"HTTP/1.1 200 OK\r\n\r\n").await.unwrap(), 19);
        body.close().await.unwrap();
        body.close().await.unwrap();

        assert!(source.is_closed());
        assert_eq!(source.written(), b"HTTP/1.1 200 OK\r\n\r\n");
    }
}
