//! HTTP header field processing
//!
//! This module reads the field lines that follow the start-line and turns them
//! into [`Headers`](crate::protocol::Headers).
//!
//! # Components
//!
//! - [`HeaderDecoder`]: Reads field lines until the blank line
//!   - Rejects lines that do not end with CRLF
//!   - Rejects whitespace between the field-name and the colon
//!   - Enforces the field line limit
//! - [`parse_field_line`]: Splits one field line into its name and values

mod header_decoder;

pub use header_decoder::{HeaderDecoder, MAX_HEADER_NUM, parse_field_line};
pub(crate) use header_decoder::read_head_line;
