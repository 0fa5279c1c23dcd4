//! Body framing resolution.
//!
//! Decides from a parsed head whether a body follows and how it is delimited.
//! refer: <https://www.rfc-editor.org/rfc/rfc9112.html#name-message-body-length>
//!
//! For requests the method table only decides when the head declares no
//! framing at all: a GET without Content-Length or Transfer-Encoding has no
//! body, a POST without them is an error. A declared framing is always
//! honoured. Responses follow the response table strictly, since the length
//! of a response to HEAD describes a body that is never sent.
//!
//! Content-Length is looked at first and wins whenever it is present, even if
//! Transfer-Encoding is present as well. Such a message is accepted rather
//! than rejected as a conflict.

use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use tracing::debug;

use crate::protocol::{Headers, Method, ParseError, PayloadSize};

/// Body framing of a request.
pub fn request_payload(method: &Method, headers: &Headers) -> Result<PayloadSize, ParseError> {
    if !method.request_has_body() && !declares_framing(headers) {
        return Ok(PayloadSize::Empty);
    }
    resolve(headers)
}

/// Body framing of a response to a request made with `request_method`.
pub fn response_payload(request_method: &Method, headers: &Headers) -> Result<PayloadSize, ParseError> {
    if !request_method.response_has_body() {
        return Ok(PayloadSize::Empty);
    }
    resolve(headers)
}

fn resolve(headers: &Headers) -> Result<PayloadSize, ParseError> {
    if let Some(values) = headers.get(CONTENT_LENGTH.as_str()) {
        let value = values.first().ok_or_else(|| ParseError::invalid_content_length("empty value"))?;
        let length = parse_content_length(value)?;
        debug!(length, "resolved fixed length body");
        return Ok(PayloadSize::Length(length));
    }

    match headers.last(TRANSFER_ENCODING.as_str()) {
        Some(coding) if is_chunked(coding) => {
            debug!("resolved chunked body");
            Ok(PayloadSize::Chunked)
        }
        Some(coding) => Err(ParseError::unsupported_transfer_encoding(coding)),
        None => Err(ParseError::MissingBodyFraming),
    }
}

fn declares_framing(headers: &Headers) -> bool {
    headers.contains(CONTENT_LENGTH.as_str()) || headers.contains(TRANSFER_ENCODING.as_str())
}

fn parse_content_length(value: &str) -> Result<u64, ParseError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::invalid_content_length(format!("value {value:?} is not a decimal number")));
    }
    value
        .parse::<u64>()
        .map_err(|e| ParseError::invalid_content_length(format!("value {value:?} is not u64: {e}")))
}

/// Checks if the final transfer-coding is chunked.
fn is_chunked(coding: &str) -> bool {
    coding.eq_ignore_ascii_case("chunked")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_headers(fields: &[(&str, &str)]) -> Headers {
        let mut headers = Headers::new();
        for (name, values) in fields {
            headers.insert(name, values.split(',').map(str::to_owned).collect());
        }
        headers
    }

    #[test]
    fn no_body_methods() {
        let headers = make_headers(&[("host", "localhost")]);
        for method in [Method::Get, Method::Head, Method::Delete, Method::Connect, Method::Options, Method::Trace] {
            assert_eq!(request_payload(&method, &headers).unwrap(), PayloadSize::Empty);
        }
    }

    #[test]
    fn declared_framing_on_no_body_method() {
        let headers = make_headers(&[("content-length", "3")]);
        assert_eq!(request_payload(&Method::Get, &headers).unwrap(), PayloadSize::Length(3));

        let headers = make_headers(&[("transfer-encoding", "chunked")]);
        assert_eq!(request_payload(&Method::Get, &headers).unwrap(), PayloadSize::Chunked);
    }

    #[test]
    fn content_length() {
        let headers = make_headers(&[("content-length", "42")]);
        assert_eq!(request_payload(&Method::Post, &headers).unwrap(), PayloadSize::Length(42));
    }

    #[test]
    fn content_length_uses_first_value() {
        let headers = make_headers(&[("content-length", "3,5")]);
        assert_eq!(request_payload(&Method::Put, &headers).unwrap(), PayloadSize::Length(3));
    }

    #[test]
    fn invalid_content_length() {
        for value in ["abc", "-1", "+5", "", "99999999999999999999999"] {
            let headers = make_headers(&[("content-length", value)]);
            let err = request_payload(&Method::Post, &headers).unwrap_err();
            assert!(matches!(err, ParseError::InvalidContentLength { .. }), "{value:?}");
        }
    }

    #[test]
    fn chunked_is_last_coding() {
        let headers = make_headers(&[("transfer-encoding", "gzip,chunked")]);
        assert_eq!(request_payload(&Method::Post, &headers).unwrap(), PayloadSize::Chunked);

        let headers = make_headers(&[("Transfer-Encoding", "Chunked")]);
        assert_eq!(request_payload(&Method::Patch, &headers).unwrap(), PayloadSize::Chunked);
    }

    #[test]
    fn unsupported_coding() {
        let headers = make_headers(&[("transfer-encoding", "chunked,gzip")]);
        let err = request_payload(&Method::Post, &headers).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedTransferEncoding { coding } if coding == "gzip"));
    }

    #[test]
    fn missing_framing() {
        let err = request_payload(&Method::Post, &Headers::new()).unwrap_err();
        assert!(matches!(err, ParseError::MissingBodyFraming));

        let err = request_payload(&Method::from_token("PURGE"), &Headers::new()).unwrap_err();
        assert!(matches!(err, ParseError::MissingBodyFraming));
    }

    #[test]
    fn content_length_wins_over_chunked() {
        let headers = make_headers(&[("transfer-encoding", "chunked"), ("content-length", "7")]);
        assert_eq!(request_payload(&Method::Post, &headers).unwrap(), PayloadSize::Length(7));
    }

    #[test]
    fn response_table() {
        let headers = make_headers(&[("content-length", "2")]);
        assert_eq!(response_payload(&Method::Head, &headers).unwrap(), PayloadSize::Empty);
        assert_eq!(response_payload(&Method::Put, &headers).unwrap(), PayloadSize::Empty);
        assert_eq!(response_payload(&Method::Get, &headers).unwrap(), PayloadSize::Length(2));
    }
}
