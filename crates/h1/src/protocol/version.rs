use std::fmt;

/// An `HTTP/<digit>.<digit>` version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpVersion {
    major: u8,
    minor: u8,
}

impl HttpVersion {
    pub const HTTP_10: HttpVersion = HttpVersion { major: 1, minor: 0 };
    pub const HTTP_11: HttpVersion = HttpVersion { major: 1, minor: 1 };

    /// Parses a version token, the whole token must match `HTTP/<d>.<d>`.
    pub fn parse(token: &[u8]) -> Option<Self> {
        match token {
            [b'H', b'T', b'T', b'P', b'/', major @ b'0'..=b'9', b'.', minor @ b'0'..=b'9'] => {
                Some(HttpVersion { major: major - b'0', minor: minor - b'0' })
            }
            _ => None,
        }
    }

    pub fn major(&self) -> u8 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }

    /// Maps to [`http::Version`] when the version is one it knows about.
    pub fn to_http(&self) -> Option<http::Version> {
        match (self.major, self.minor) {
            (0, 9) => Some(http::Version::HTTP_09),
            (1, 0) => Some(http::Version::HTTP_10),
            (1, 1) => Some(http::Version::HTTP_11),
            (2, 0) => Some(http::Version::HTTP_2),
            (3, 0) => Some(http::Version::HTTP_3),
            _ => None,
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}
