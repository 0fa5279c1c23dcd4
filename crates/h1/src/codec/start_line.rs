//! Start-line parsing.
//!
//! ```text
//! request-line = method SP request-target SP HTTP-version
//! status-line  = HTTP-version SP status-code SP reason-phrase
//! ```
//!
//! A line starting with `HTTP` is a status-line, anything else is a
//! request-line. The target, status code and reason phrase are only checked
//! for presence.

use crate::ensure;
use crate::protocol::{HttpVersion, Method, ParseError, StartLine};

/// Parses a start-line whose trailing CR has already been stripped.
pub fn parse_start_line(line: &[u8]) -> Result<StartLine, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_e| ParseError::malformed_headers("start-line is not valid utf-8"))?;

    if line.starts_with("HTTP") {
        parse_status_line(line)
    } else {
        parse_request_line(line)
    }
}

fn parse_status_line(line: &str) -> Result<StartLine, ParseError> {
    let (version, rest) = split_segment(line, "http version")?;
    let version = parse_version(version)?;

    let (status, reason) = split_segment(rest, "status code")?;
    ensure!(!reason.is_empty(), ParseError::malformed_headers("missing reason phrase"));

    Ok(StartLine::Status { version, status: status.to_owned(), reason: reason.to_owned() })
}

fn parse_request_line(line: &str) -> Result<StartLine, ParseError> {
    let (method, rest) = split_segment(line, "method")?;
    let (target, version) = split_segment(rest, "request target")?;
    ensure!(!version.is_empty(), ParseError::malformed_headers("missing http version"));
    let version = parse_version(version)?;

    Ok(StartLine::Request { method: Method::from_token(method), target: target.to_owned(), version })
}

/// Splits on the first SP, the segment before it must not be empty.
fn split_segment<'a>(s: &'a str, what: &str) -> Result<(&'a str, &'a str), ParseError> {
    match s.split_once(' ') {
        Some((segment, rest)) if !segment.is_empty() => Ok((segment, rest)),
        Some(_) => Err(ParseError::malformed_headers(format!("empty {what}"))),
        None => Err(ParseError::malformed_headers(format!("missing separator after {what}"))),
    }
}

fn parse_version(token: &str) -> Result<HttpVersion, ParseError> {
    HttpVersion::parse(token.as_bytes()).ok_or_else(|| ParseError::malformed_headers(format!("invalid http version {token:?}")))
}
