//! Reply head serializer.
//!
//! ```text
//! HTTP/1.1 SP status-code SP reason-phrase CRLF
//! *( field-name ":" SP field-value CRLF )
//! CRLF
//! ```
//!
//! The reason phrase is the canonical one for the status code, empty when the
//! code has none. Repeated values of one field-name are joined with `", "`
//! into a single line. No Content-Length or Transfer-Encoding is added.

use std::io;
use std::io::ErrorKind;

use bytes::{BufMut, BytesMut};
use http::Version;
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::{ResponseHead, SendError};

/// Initial buffer size reserved for a reply head
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder turning a [`ResponseHead`] into its wire form.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<ResponseHead> for ResponseEncoder {
    type Error = SendError;

    /// Serializes `item` into `dst`.
    ///
    /// # Errors
    ///
    /// Returns error if the head carries a version other than HTTP/1.1.
    fn encode(&mut self, item: ResponseHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if item.version() != Version::HTTP_11 {
            error!(http_version = ?item.version(), "unsupported http version");
            return Err(io::Error::from(ErrorKind::Unsupported).into());
        }

        let status = item.status();
        dst.reserve(INIT_HEADER_SIZE);
        dst.put_slice(b"HTTP/1.1 ");
        dst.put_slice(status.as_str().as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(status.canonical_reason().unwrap_or_default().as_bytes());
        dst.put_slice(b"\r\n");

        let headers = item.headers();
        for name in headers.keys() {
            dst.put_slice(name.as_str().as_bytes());
            dst.put_slice(b": ");
            for (i, value) in headers.get_all(name).iter().enumerate() {
                if i > 0 {
                    dst.put_slice(b", ");
                }
                dst.put_slice(value.as_bytes());
            }
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::status_response;
    use http::header::{CONTENT_TYPE, VARY};
    use http::{HeaderValue, StatusCode};

    fn encode(head: ResponseHead) -> BytesMut {
        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(head, &mut dst).unwrap();
        dst
    }

    #[test]
    fn default_reply() {
        assert_eq!(&encode(ResponseHead::default())[..], b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn status_and_fields() {
        let mut head = status_response(StatusCode::NOT_FOUND);
        head.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        assert_eq!(&encode(head)[..], b"HTTP/1.1 404 Not Found\r\ncontent-type: text/plain\r\n\r\n");
    }

    #[test]
    fn repeated_values_are_joined() {
        let mut head = ResponseHead::default();
        head.headers_mut().append(VARY, HeaderValue::from_static("accept"));
        head.headers_mut().append(VARY, HeaderValue::from_static("origin"));

        assert_eq!(&encode(head)[..], b"HTTP/1.1 200 OK\r\nvary: accept, origin\r\n\r\n");
    }

    #[test]
    fn unknown_reason() {
        let head = status_response(StatusCode::from_u16(599).unwrap());
        assert_eq!(&encode(head)[..], b"HTTP/1.1 599 \r\n\r\n");
    }

    #[test]
    fn rejects_other_versions() {
        let mut head = ResponseHead::default();
        *head.version_mut() = Version::HTTP_10;

        let err = ResponseEncoder::new().encode(head, &mut BytesMut::new()).unwrap_err();
        assert!(matches!(err, SendError::Io { source } if source.kind() == ErrorKind::Unsupported));
    }
}
