//! Decoder implementation for HTTP chunked transfer encoding.
//!
//! This module provides functionality to decode HTTP messages that use chunked transfer encoding
//! as specified in [RFC 9112 Section 7.1](https://www.rfc-editor.org/rfc/rfc9112.html#section-7.1).
//!
//! The chunked encoding allows the sender to transmit message data in a series of chunks,
//! indicating the size of each chunk before its data.
//!
//! Trailer fields after the last chunk are not consumed: decoding ends as soon
//! as the zero-size line has been read.

use std::cmp;

use tracing::trace;
use ChunkedState::*;

use crate::protocol::BodyError;
use crate::source::ByteSource;

/// Maximum size in bytes of one chunk-size line, extensions included
pub const MAX_CHUNK_LINE_BYTES: usize = 256;

/// A decoder for handling HTTP chunked transfer encoding.
///
/// The decoder pulls bytes from a [`ByteSource`] according to the chunked format:
/// - Each chunk starts with its size in hexadecimal, optional extensions and CRLF
/// - Then the chunk data and CRLF
/// - A zero-sized chunk indicates the end of the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkedState,
    remaining_size: u64,
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkedDecoder {
    /// Creates a new ChunkedDecoder instance.
    ///
    /// The decoder starts in the Size state, ready to read the size of the first chunk.
    pub fn new() -> Self {
        Self { state: Size, remaining_size: 0 }
    }

    /// Returns true once the zero-size chunk has been read.
    pub fn is_finished(&self) -> bool {
        self.state == End
    }

    /// Bytes still owed for the current chunk, 0 between chunks.
    pub fn remaining_in_chunk(&self) -> u64 {
        self.remaining_size
    }

    /// Decodes the next piece of chunk data into `dst`.
    ///
    /// # Returns
    /// - `Ok(n)` with `n > 0` when `n` bytes of chunk data were copied into `dst`
    /// - `Ok(0)` when the final chunk is processed (end of stream), on every call after it,
    ///   or when `dst` is empty
    /// - `Err(BodyError)` if the chunked encoding is invalid or the source ended mid-chunk
    pub async fn decode<S: ByteSource>(&mut self, source: &mut S, dst: &mut [u8]) -> Result<usize, BodyError> {
        loop {
            match self.state {
                End => return Ok(0),
                _ if dst.is_empty() => return Ok(0),
                Size => {
                    let size = read_chunk_size(source).await?;
                    if size == 0 {
                        trace!("finished reading chunked data");
                        self.state = End;
                        return Ok(0);
                    }
                    trace!(size, "read chunk size");
                    self.remaining_size = size;
                    self.state = Body;
                }
                Body => return self.read_body(source, dst).await,
                BodyCrlf => {
                    read_body_crlf(source).await?;
                    self.state = Size;
                }
            }
        }
    }

    /// Reads chunk data, consuming the trailing CRLF as soon as the chunk is drained.
    async fn read_body<S: ByteSource>(&mut self, source: &mut S, dst: &mut [u8]) -> Result<usize, BodyError> {
        // cap remaining bytes at the max capacity of usize
        let remaining = usize::try_from(self.remaining_size).unwrap_or(usize::MAX);
        let read_size = cmp::min(remaining, dst.len());

        let n = source.read(&mut dst[..read_size]).await?;
        if n == 0 {
            return Err(BodyError::UnexpectedEof);
        }

        self.remaining_size -= n as u64;
        trace!(len = n, remaining = self.remaining_size, "read chunked bytes");

        if self.remaining_size == 0 {
            self.state = BodyCrlf;
            read_body_crlf(source).await?;
            self.state = Size;
        }

        Ok(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkedState {
    /// Read the chunk size line
    Size,
    /// Read chunk data
    Body,
    /// Read CRLF after chunk data
    BodyCrlf,
    /// Final state after reading last chunk
    End,
}

/// Reads and parses one chunk-size line.
///
/// The line must end with CR, must not be empty, and its size part must be
/// hexadecimal. Anything after a `;` is a chunk extension and is ignored.
async fn read_chunk_size<S: ByteSource>(source: &mut S) -> Result<u64, BodyError> {
    let mut buf = [0u8; MAX_CHUNK_LINE_BYTES];
    let n = source.read_line(&mut buf).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => BodyError::UnexpectedEof,
        _ => BodyError::io(e),
    })?;

    if n == buf.len() {
        return Err(BodyError::ChunkLineTooLong { max_size: MAX_CHUNK_LINE_BYTES });
    }
    if n == 0 {
        return Err(BodyError::EmptyChunkSize);
    }

    let line = buf[..n]
        .strip_suffix(b"\r")
        .ok_or_else(|| BodyError::invalid_chunk_size("expect line to end with CR"))?;
    if line.is_empty() {
        return Err(BodyError::EmptyChunkSize);
    }

    let size = match line.iter().position(|b| *b == b';') {
        Some(pos) => line[..pos].trim_ascii_end(),
        None => line,
    };
    parse_hex(size)
}

fn parse_hex(digits: &[u8]) -> Result<u64, BodyError> {
    if digits.is_empty() {
        return Err(BodyError::EmptyChunkSize);
    }

    let mut size: u64 = 0;
    for b in digits {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b + 10 - b'a',
            b'A'..=b'F' => b + 10 - b'A',
            _ => return Err(BodyError::invalid_chunk_size(format!("invalid hex digit {:?}", char::from(*b)))),
        };
        size = size
            .checked_mul(16)
            .and_then(|size| size.checked_add(u64::from(digit)))
            .ok_or_else(|| BodyError::invalid_chunk_size("invalid overflow chunked length"))?;
    }
    Ok(size)
}

async fn read_body_crlf<S: ByteSource>(source: &mut S) -> Result<(), BodyError> {
    let mut crlf = [0u8; 2];
    source.read_exact(&mut crlf).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => BodyError::UnexpectedEof,
        _ => BodyError::io(e),
    })?;

    if &crlf != b"\r\n" {
        return Err(BodyError::MissingChunkCrlf);
    }
    Ok(())
}
