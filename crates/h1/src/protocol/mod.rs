//! Core HTTP/1.1 protocol types.
//!
//! # Architecture
//!
//! - **Message Handling** ([`message`]): what the decoder produces
//!   - [`Message`]: A parsed head plus its optional body stream
//!   - [`PayloadItem`]: One piece of body data, or the end of the body
//!   - [`PayloadSize`]: How the body is framed
//!
//! - **Head** ([`head`]): start-line and header fields
//!   - [`MessageHead`], [`StartLine`], [`MessageKind`]
//!   - [`Method`]: Standard methods plus an `Other` token
//!   - [`HttpVersion`]: `HTTP/<major>.<minor>`
//!   - [`Headers`]: Lowercased names mapped to ordered value lists
//!
//! - **Body Streaming** ([`body`]): [`BodyStream`](body::BodyStream) reads the
//!   body straight from the connection
//!
//! - **Replies** ([`response`]): [`ResponseHead`]
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Framing errors in the head
//!   - [`BodyError`]: Framing errors in a chunked or truncated body
//!   - [`SendError`]: Reply sending errors

pub mod body;
pub mod error;
pub mod head;
pub mod message;
pub mod response;

pub mod header;
mod method;
mod version;

pub use error::{BodyError, HttpError, ParseError, SendError};
pub use head::{MessageHead, MessageKind, StartLine};
pub use header::Headers;
pub use message::{Message, PayloadItem, PayloadSize};
pub use method::Method;
pub use response::{ResponseHead, status_response};
pub use version::HttpVersion;
