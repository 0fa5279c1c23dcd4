//! Decoder implementation for HTTP message payloads.
//!
//! This module provides a unified decoder over the two ways a body can be framed:
//! - Content-Length based payloads
//! - Chunked transfer encoding
//!
//! Callers drive it through one `decode` call and never branch on the framing.

use crate::codec::body::chunked_decoder::ChunkedDecoder;
use crate::codec::body::length_decoder::LengthDecoder;
use crate::protocol::BodyError;
use crate::source::ByteSource;

/// A unified decoder for handling HTTP message payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    /// The specific decoding strategy to use
    kind: Kind,
}

/// Enum representing different payload decoding strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Decode payload with a fixed content length
    Length(LengthDecoder),

    /// Decode payload using chunked transfer encoding
    Chunked(ChunkedDecoder),
}

impl PayloadDecoder {
    /// Creates a PayloadDecoder for chunked transfer encoding.
    pub fn chunked() -> Self {
        Self { kind: Kind::Chunked(ChunkedDecoder::new()) }
    }

    /// Creates a PayloadDecoder for a fixed-length payload.
    ///
    /// # Arguments
    /// * `size` - The expected content length in bytes
    pub fn fix_length(size: u64) -> Self {
        Self { kind: Kind::Length(LengthDecoder::new(size)) }
    }

    /// Returns whether this decoder handles chunked transfer encoding.
    pub fn is_chunked(&self) -> bool {
        matches!(self.kind, Kind::Chunked(_))
    }

    /// Returns whether the whole body has been decoded.
    pub fn is_finished(&self) -> bool {
        match &self.kind {
            Kind::Length(length_decoder) => length_decoder.is_finished(),
            Kind::Chunked(chunked_decoder) => chunked_decoder.is_finished(),
        }
    }

    /// Decodes the next piece of the body into `dst`, `Ok(0)` meaning end of body.
    pub async fn decode<S: ByteSource>(&mut self, source: &mut S, dst: &mut [u8]) -> Result<usize, BodyError> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode(source, dst).await,
            Kind::Chunked(chunked_decoder) => chunked_decoder.decode(source, dst).await,
        }
    }
}
