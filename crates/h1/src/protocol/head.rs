//! Parsed message head: start-line plus header fields.

use http::StatusCode;

use crate::protocol::{Headers, HttpVersion, Method};

/// Direction of a parsed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
}

/// The first line of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartLine {
    /// `<method> SP <target> SP <version>`
    Request { method: Method, target: String, version: HttpVersion },
    /// `<version> SP <status-code> SP <reason-phrase>`
    Status { version: HttpVersion, status: String, reason: String },
}

impl StartLine {
    pub fn kind(&self) -> MessageKind {
        match self {
            StartLine::Request { .. } => MessageKind::Request,
            StartLine::Status { .. } => MessageKind::Response,
        }
    }

    pub fn version(&self) -> HttpVersion {
        match self {
            StartLine::Request { version, .. } | StartLine::Status { version, .. } => *version,
        }
    }
}

/// Everything of a message that comes before its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHead {
    start_line: StartLine,
    headers: Headers,
}

impl MessageHead {
    pub fn new(start_line: StartLine, headers: Headers) -> Self {
        Self { start_line, headers }
    }

    pub fn kind(&self) -> MessageKind {
        self.start_line.kind()
    }

    pub fn is_request(&self) -> bool {
        self.kind() == MessageKind::Request
    }

    pub fn start_line(&self) -> &StartLine {
        &self.start_line
    }

    /// The request method, `None` for responses.
    pub fn method(&self) -> Option<&Method> {
        match &self.start_line {
            StartLine::Request { method, .. } => Some(method),
            StartLine::Status { .. } => None,
        }
    }

    /// The raw request-target, `None` for responses.
    pub fn target(&self) -> Option<&str> {
        match &self.start_line {
            StartLine::Request { target, .. } => Some(target),
            StartLine::Status { .. } => None,
        }
    }

    /// The raw status code, `None` for requests.
    pub fn status(&self) -> Option<&str> {
        match &self.start_line {
            StartLine::Status { status, .. } => Some(status),
            StartLine::Request { .. } => None,
        }
    }

    /// The status code when it is a valid three digit code.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status().and_then(|status| StatusCode::from_bytes(status.as_bytes()).ok())
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.start_line {
            StartLine::Status { reason, .. } => Some(reason),
            StartLine::Request { .. } => None,
        }
    }

    pub fn version(&self) -> HttpVersion {
        self.start_line.version()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}
