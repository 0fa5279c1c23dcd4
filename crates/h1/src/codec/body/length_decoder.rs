//! Decoder implementation for HTTP messages with Content-Length header.
//!
//! This module provides functionality to decode HTTP messages where the payload size
//! is specified by the Content-Length header, as defined in
//! [RFC 9112 Section 6.2](https://www.rfc-editor.org/rfc/rfc9112.html#section-6.2).

use std::cmp;

use tracing::trace;

use crate::protocol::BodyError;
use crate::source::ByteSource;

/// A decoder for handling HTTP messages with a known content length.
///
/// The decoder tracks the bytes delivered so far against the declared total and
/// never reads past the end of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// Declared body length
    length: u64,
    /// Bytes handed out so far
    delivered: u64,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: u64) -> Self {
        Self { length, delivered: 0 }
    }

    pub fn remaining(&self) -> u64 {
        self.length - self.delivered
    }

    pub fn is_finished(&self) -> bool {
        self.delivered >= self.length
    }

    /// Reads the next piece of the body into `dst`.
    ///
    /// # Returns
    /// * `Ok(0)` once all bytes have been read, or when `dst` is empty
    /// * `Ok(n)` when `n` bytes of the body were copied into `dst`
    /// * `Err(BodyError::UnexpectedEof)` if the source ends before the declared length
    pub async fn decode<S: ByteSource>(&mut self, source: &mut S, dst: &mut [u8]) -> Result<usize, BodyError> {
        if self.is_finished() || dst.is_empty() {
            return Ok(0);
        }

        let want = usize::try_from(self.remaining()).map_or(dst.len(), |remaining| cmp::min(remaining, dst.len()));
        let n = source.read(&mut dst[..want]).await?;
        if n == 0 {
            return Err(BodyError::UnexpectedEof);
        }

        self.delivered += n as u64;
        trace!(len = n, remaining = self.remaining(), "read fixed length bytes");
        Ok(n)
    }
}
