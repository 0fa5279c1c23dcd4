//! Reply head type.
//!
//! Replies are plain `http::Response<()>` values: a status and a header map,
//! no body. `ResponseHead::default()` is `200 OK` over HTTP/1.1.

use http::{Response, StatusCode};

/// Head of a reply, serialized by [`ResponseEncoder`](crate::codec::ResponseEncoder).
pub type ResponseHead = Response<()>;

/// Builds a reply head with `status` and no header fields.
pub fn status_response(status: StatusCode) -> ResponseHead {
    let mut head = ResponseHead::default();
    *head.status_mut() = status;
    head
}
