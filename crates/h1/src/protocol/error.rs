use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("body error: {source}")]
    BodyError {
        #[from]
        source: BodyError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Framing errors raised while reading a message head.
///
/// Any of these aborts parsing: no message is produced and the connection
/// must be treated as unusable.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed headers: {reason}")]
    MalformedHeaders { reason: String },

    #[error("header line exceed the limit {max_size}")]
    TooLargeLine { max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("failed to parse content length: {reason}")]
    InvalidContentLength { reason: String },

    #[error("content encoding not provided")]
    MissingBodyFraming,

    #[error("content length not provided, unsupported transfer-encoding {coding:?}")]
    UnsupportedTransferEncoding { coding: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_headers<S: ToString>(str: S) -> Self {
        Self::MalformedHeaders { reason: str.to_string() }
    }

    pub fn too_large_line(max_size: usize) -> Self {
        Self::TooLargeLine { max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn unsupported_transfer_encoding<S: ToString>(coding: S) -> Self {
        Self::UnsupportedTransferEncoding { coding: coding.to_string() }
    }

    /// Returns true if the source ended before a line could be read.
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, Self::Io { source } if source.kind() == io::ErrorKind::UnexpectedEof)
    }
}

/// Chunk-framing errors raised while consuming a message body.
///
/// The body stream is left in an undefined state and must be closed.
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("failed to parse chunk length: {reason}")]
    InvalidChunkSize { reason: String },

    #[error("unexpected chunk length")]
    EmptyChunkSize,

    #[error("chunk size line exceed the limit {max_size}")]
    ChunkLineTooLong { max_size: usize },

    #[error("expect chunk to end with CRLF")]
    MissingChunkCrlf,

    #[error("connection closed before body completed")]
    UnexpectedEof,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl BodyError {
    pub fn invalid_chunk_size<S: ToString>(str: S) -> Self {
        Self::InvalidChunkSize { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
