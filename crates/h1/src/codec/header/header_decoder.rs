//! HTTP header field decoder.
//!
//! Reads field lines from a [`ByteSource`] until the blank line that ends the
//! head, and collects them into [`Headers`].
//!
//! ```text
//! field-line = field-name ":" OWS field-value OWS
//! ```
//!
//! # Rules
//!
//! - Every line must end with CRLF, a line without the CR is malformed
//! - No whitespace is allowed between the field-name and the colon
//! - The value is trimmed and split on commas (with optional spaces around
//!   them) into an ordered list, a single value gives a one element list
//! - Names are stored lowercased, a repeated name replaces the earlier values
//!
//! # Limits
//!
//! - Maximum number of field lines: [`MAX_HEADER_NUM`]
//! - Maximum line length: the size of the line buffer handed in by the caller

use tracing::trace;

use crate::ensure;
use crate::protocol::{Headers, ParseError};
use crate::source::ByteSource;

/// Maximum number of field lines allowed in a message head
pub const MAX_HEADER_NUM: usize = 64;

/// Decoder for the field lines of a message head.
#[derive(Debug, Clone, Copy)]
pub struct HeaderDecoder {
    max_headers: usize,
}

impl Default for HeaderDecoder {
    fn default() -> Self {
        Self::new(MAX_HEADER_NUM)
    }
}

impl HeaderDecoder {
    pub fn new(max_headers: usize) -> Self {
        Self { max_headers }
    }

    /// Reads field lines until the blank line, using `buf` as line buffer.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - A line does not end with CRLF or fills the whole buffer
    /// - A field line has no colon, an empty name or whitespace before the colon
    /// - There are more than `max_headers` field lines
    pub async fn decode<S: ByteSource>(&self, source: &mut S, buf: &mut [u8]) -> Result<Headers, ParseError> {
        let mut headers = Headers::new();
        let mut count = 0;

        while let Some(len) = read_head_line(source, buf).await? {
            count += 1;
            ensure!(count <= self.max_headers, ParseError::too_many_headers(self.max_headers));

            let (name, values) = parse_field_line(&buf[..len])?;
            trace!(name = %name, values = values.len(), "parsed field line");
            if headers.insert(&name, values).is_some() {
                trace!(name = %name, "repeated field line replaces earlier values");
            }
        }

        Ok(headers)
    }
}

/// Reads one head line and strips its CR.
///
/// Returns `None` for the blank line (a bare CRLF, or a bare LF) and
/// `Some(len)` for a line whose content now sits in `buf[..len]`.
pub(crate) async fn read_head_line<S: ByteSource>(source: &mut S, buf: &mut [u8]) -> Result<Option<usize>, ParseError> {
    let n = source.read_line(buf).await?;
    ensure!(n < buf.len(), ParseError::too_large_line(buf.len()));

    match n {
        0 => Ok(None),
        n if buf[n - 1] != b'\r' => Err(ParseError::malformed_headers("line does not end with CRLF")),
        1 => Ok(None),
        n => Ok(Some(n - 1)),
    }
}

/// Splits a field line into its lowercased name and its list of values.
pub fn parse_field_line(line: &[u8]) -> Result<(String, Vec<String>), ParseError> {
    let colon = line.iter().position(|b| *b == b':').ok_or_else(|| ParseError::malformed_headers("field line without colon"))?;

    let name = &line[..colon];
    ensure!(!name.is_empty(), ParseError::malformed_headers("empty field name"));
    ensure!(
        !matches!(name.last(), Some(b' ' | b'\t')),
        ParseError::malformed_headers("whitespace between field name and colon")
    );

    let name = String::from_utf8_lossy(name).to_ascii_lowercase();
    let value = String::from_utf8_lossy(line[colon + 1..].trim_ascii());
    Ok((name, split_values(&value)))
}

fn split_values(value: &str) -> Vec<String> {
    value.split(',').map(|v| v.trim_matches(' ').to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use indoc::indoc;

    fn owned(vs: &[&str]) -> Vec<String> {
        vs.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn field_line_values() {
        let (name, values) = parse_field_line(b"Accept: a, b,c").unwrap();
        assert_eq!(name, "accept");
        assert_eq!(values, owned(&["a", "b", "c"]));
    }

    #[test]
    fn field_line_single_value() {
        let (name, values) = parse_field_line(b"Host:   127.0.0.1:8080  ").unwrap();
        assert_eq!(name, "host");
        assert_eq!(values, owned(&["127.0.0.1:8080"]));
    }

    #[test]
    fn field_line_empty_value() {
        let (_, values) = parse_field_line(b"X-Empty:").unwrap();
        assert_eq!(values, owned(&[""]));
    }

    #[test]
    fn field_line_errors() {
        for line in [&b"no colon here"[..], b"Host : x", b"Host\t: x", b": x"] {
            assert!(
                matches!(parse_field_line(line), Err(ParseError::MalformedHeaders { .. })),
                "{:?}",
                String::from_utf8_lossy(line)
            );
        }
    }

    #[tokio::test]
    async fn decode_headers() {
        let str = indoc! {"
            Host: 127.0.0.1:8080
            User-Agent: curl/7.79.1
            Accept-Encoding: gzip, deflate, br

            body"};

        let mut source = MemorySource::new(str.replace('\n', "\r\n"));
        let mut buf = [0u8; 256];
        let headers = HeaderDecoder::default().decode(&mut source, &mut buf).await.unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.first("host"), Some("127.0.0.1:8080"));
        assert_eq!(headers.first("USER-AGENT"), Some("curl/7.79.1"));
        assert_eq!(headers.get("accept-encoding"), Some(&owned(&["gzip", "deflate", "br"])[..]));
        assert_eq!(source.remaining(), b"body");
    }

    #[tokio::test]
    async fn lf_only_lines_are_malformed() {
        let str = indoc! {"
            Host: 127.0.0.1:8080
            Accept: */*

            "};

        let mut source = MemorySource::new(str);
        let mut buf = [0u8; 256];
        let err = HeaderDecoder::default().decode(&mut source, &mut buf).await.unwrap_err();

        assert!(matches!(err, ParseError::MalformedHeaders { .. }));
    }

    #[tokio::test]
    async fn duplicate_fields_overwrite() {
        let mut source = MemorySource::new("X-Tag: a\r\nX-Tag: b\r\n\r\n");
        let mut buf = [0u8; 64];
        let headers = HeaderDecoder::default().decode(&mut source, &mut buf).await.unwrap();

        assert_eq!(headers.get("x-tag"), Some(&owned(&["b"])[..]));
    }

    #[tokio::test]
    async fn line_without_cr() {
        let mut source = MemorySource::new("Host: x\n\r\n");
        let mut buf = [0u8; 64];
        let err = HeaderDecoder::default().decode(&mut source, &mut buf).await.unwrap_err();

        assert!(matches!(err, ParseError::MalformedHeaders { .. }));
    }

    #[tokio::test]
    async fn bare_lf_ends_head() {
        let mut source = MemorySource::new("Host: x\r\n\nrest");
        let mut buf = [0u8; 64];
        let headers = HeaderDecoder::default().decode(&mut source, &mut buf).await.unwrap();

        assert_eq!(headers.first("host"), Some("x"));
        assert_eq!(source.remaining(), b"rest");
    }

    #[tokio::test]
    async fn too_long_line() {
        let mut source = MemorySource::new("X-Long: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n\r\n");
        let mut buf = [0u8; 16];
        let err = HeaderDecoder::default().decode(&mut source, &mut buf).await.unwrap_err();

        assert!(matches!(err, ParseError::TooLargeLine { max_size: 16 }));
    }

    #[tokio::test]
    async fn too_many_headers() {
        let mut source = MemorySource::new("A: 1\r\nB: 2\r\nC: 3\r\n\r\n");
        let mut buf = [0u8; 64];
        let err = HeaderDecoder::new(2).decode(&mut source, &mut buf).await.unwrap_err();

        assert!(matches!(err, ParseError::TooManyHeaders { max_num: 2 }));
    }

    #[tokio::test]
    async fn eof_inside_head() {
        let mut source = MemorySource::new("Host: x\r\n");
        let mut buf = [0u8; 64];
        let err = HeaderDecoder::default().decode(&mut source, &mut buf).await.unwrap_err();

        assert!(err.is_connection_closed());
    }
}
