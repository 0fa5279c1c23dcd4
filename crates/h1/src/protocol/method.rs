//! Request methods and the body-presence tables keyed by them.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An HTTP request method.
///
/// The standard tokens get their own variant, anything else is kept verbatim
/// in [`Method::Other`]. Method tokens are case-sensitive, so `get` is an
/// `Other` method rather than [`Method::Get`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
    Other(String),
}

impl Method {
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "CONNECT" => Method::Connect,
            "OPTIONS" => Method::Options,
            "TRACE" => Method::Trace,
            "PATCH" => Method::Patch,
            other => Method::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
            Method::Other(token) => token,
        }
    }

    /// Whether a request with this method is expected to carry a body.
    ///
    /// Unknown methods are treated as carrying one.
    pub fn request_has_body(&self) -> bool {
        match self {
            Method::Post | Method::Put | Method::Patch => true,
            Method::Get | Method::Head | Method::Delete | Method::Connect | Method::Options | Method::Trace => false,
            Method::Other(_) => true,
        }
    }

    /// Whether the response to a request with this method carries a body.
    pub fn response_has_body(&self) -> bool {
        match self {
            Method::Get | Method::Post | Method::Delete | Method::Connect | Method::Options | Method::Patch => true,
            Method::Head | Method::Put | Method::Trace => false,
            Method::Other(_) => true,
        }
    }
}

impl FromStr for Method {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Method::from_token(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tokens() {
        for token in ["GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE", "PATCH"] {
            let method = Method::from_token(token);
            assert!(!matches!(method, Method::Other(_)), "{token} should be a standard method");
            assert_eq!(method.as_str(), token);
        }
    }

    #[test]
    fn long_extension_methods_are_not_truncated() {
        let method: Method = "PROPPATCHEXTENDED".parse().unwrap();
        assert_eq!(method, Method::Other("PROPPATCHEXTENDED".to_owned()));
        assert_eq!(method.to_string(), "PROPPATCHEXTENDED");
        assert_ne!(Method::from_token("OPTIONSX"), Method::Options);
    }

    #[test]
    fn request_body_table() {
        assert!(Method::Post.request_has_body());
        assert!(Method::Put.request_has_body());
        assert!(Method::Patch.request_has_body());
        assert!(!Method::Get.request_has_body());
        assert!(!Method::Head.request_has_body());
        assert!(!Method::Delete.request_has_body());
        assert!(!Method::Connect.request_has_body());
        assert!(!Method::Options.request_has_body());
        assert!(!Method::Trace.request_has_body());
        assert!(Method::from_token("MKCOL").request_has_body());
    }

    #[test]
    fn response_body_table() {
        assert!(Method::Get.response_has_body());
        assert!(Method::Delete.response_has_body());
        assert!(!Method::Head.response_has_body());
        assert!(!Method::Put.response_has_body());
        assert!(!Method::Trace.response_has_body());
        assert!(Method::from_token("get").response_has_body());
    }
}
