use std::error::Error;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use http::StatusCode;
use tokio_util::codec::Encoder;
use tracing::{error, info, warn};

use crate::codec::{MessageDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::{HttpError, ResponseHead, SendError, status_response};
use crate::source::ByteSource;

/// An HTTP connection serving a single request.
///
/// `HttpConnection` handles the whole lifecycle of one exchange:
/// - Reading and decoding the request head
/// - Draining the request body
/// - Calling the handler
/// - Writing the reply head and closing the connection
///
/// There is no keep-alive: the connection is closed after the first reply,
/// or without a reply when the request body turns out to be malformed.
#[derive(Debug)]
pub struct HttpConnection<S> {
    source: S,
    decoder: MessageDecoder,
    encoder: ResponseEncoder,
}

impl<S> HttpConnection<S>
where
    S: ByteSource,
{
    pub fn new(source: S) -> Self {
        Self::with_decoder(source, MessageDecoder::new())
    }

    pub fn with_decoder(source: S, decoder: MessageDecoder) -> Self {
        Self { source, decoder, encoder: ResponseEncoder::new() }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Serves one request with `handler`, then closes the connection.
    ///
    /// A peer that goes away before sending a start-line is not an error.
    ///
    /// # Errors
    ///
    /// - [`HttpError::RequestError`] when the head is malformed, after a
    ///   `400 Bad Request` reply has been sent
    /// - [`HttpError::BodyError`] when the body is malformed or truncated, no
    ///   reply is sent
    /// - [`HttpError::ResponseError`] when the reply cannot be written
    pub async fn process<H>(&mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let result = self.do_process(handler.as_ref()).await;

        if let Err(e) = self.source.close().await {
            warn!(cause = %e, "failed to close connection");
        }
        result
    }

    async fn do_process<H>(&mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let message = match self.decoder.decode(&mut self.source).await {
            Ok(message) => message,
            Err(e) if e.is_connection_closed() => {
                info!("connection closed before a request arrived");
                return Ok(());
            }
            Err(e) => {
                error!(cause = %e, "can't decode request head");
                self.send_response(status_response(StatusCode::BAD_REQUEST)).await?;
                return Err(e.into());
            }
        };

        let (head, body) = message.into_parts();
        info!(method = ?head.method(), target = ?head.target(), "received request");

        let body = match body {
            Some(mut body) => match body.collect().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!(cause = %e, "can't read request body, closing without reply");
                    return Err(e.into());
                }
            },
            None => Bytes::new(),
        };

        let response = match handler.call(head, body).await {
            Ok(response) => response,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!(cause = %e, "handle request error");
                status_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        self.send_response(response).await?;
        Ok(())
    }

    async fn send_response(&mut self, response: ResponseHead) -> Result<(), SendError> {
        let status = response.status();

        let mut buf = BytesMut::new();
        self.encoder.encode(response, &mut buf)?;
        self.source.write_all(&buf).await.map_err(SendError::io)?;
        self.source.flush().await.map_err(SendError::io)?;

        info!(status = status.as_u16(), "sent response");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::make_handler;
    use crate::protocol::MessageHead;
    use crate::source::MemorySource;
    use http::header::CONTENT_LENGTH;
    use http::HeaderValue;

    async fn echo_length(head: MessageHead, body: Bytes) -> Result<ResponseHead, Box<dyn Error + Send + Sync>> {
        assert_eq!(head.target(), Some("/echo"));

        let mut response = status_response(StatusCode::CREATED);
        response.headers_mut().insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        Ok(response)
    }

    async fn failing(_head: MessageHead, _body: Bytes) -> Result<ResponseHead, Box<dyn Error + Send + Sync>> {
        Err("handler failed".into())
    }

    async fn serve<H: Handler>(input: &'static str, handler: H) -> (Result<(), HttpError>, MemorySource) {
        let mut connection = HttpConnection::new(MemorySource::new(input));
        let result = connection.process(Arc::new(handler)).await;
        (result, connection.source().clone())
    }

    #[tokio::test]
    async fn fixed_length_request() {
        let (result, source) = serve("POST /echo HTTP/1.1\r\ncontent-length: 5\r\n\r\nhello", make_handler(echo_length)).await;

        result.unwrap();
        assert_eq!(source.written(), b"HTTP/1.1 201 Created\r\ncontent-length: 5\r\n\r\n");
        assert!(source.is_closed());
    }

    #[tokio::test]
    async fn chunked_request() {
        let input = "PUT /echo HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n3\r\nabc\r\n4\r\ndefg\r\n0\r\n";
        let (result, source) = serve(input, make_handler(echo_length)).await;

        result.unwrap();
        assert_eq!(source.written(), b"HTTP/1.1 201 Created\r\ncontent-length: 7\r\n\r\n");
    }

    #[tokio::test]
    async fn malformed_head_gets_bad_request() {
        let (result, source) = serve("GET /echo FOO/1.1\r\n\r\n", make_handler(echo_length)).await;

        assert!(matches!(result, Err(HttpError::RequestError { .. })));
        assert_eq!(source.written(), b"HTTP/1.1 400 Bad Request\r\n\r\n");
        assert!(source.is_closed());
    }

    #[tokio::test]
    async fn malformed_body_closes_without_reply() {
        let input = "POST /echo HTTP/1.1\r\ntransfer-encoding: chunked\r\n\r\nzz\r\nabc\r\n0\r\n";
        let (result, source) = serve(input, make_handler(echo_length)).await;

        assert!(matches!(result, Err(HttpError::BodyError { .. })));
        assert!(source.written().is_empty());
        assert!(source.is_closed());
    }

    #[tokio::test]
    async fn handler_error_gets_internal_error() {
        let (result, source) = serve("GET /echo HTTP/1.1\r\n\r\n", make_handler(failing)).await;

        result.unwrap();
        assert_eq!(source.written(), b"HTTP/1.1 500 Internal Server Error\r\n\r\n");
    }

    #[tokio::test]
    async fn peer_gone_before_request() {
        let (result, source) = serve("", make_handler(echo_length)).await;

        result.unwrap();
        assert!(source.written().is_empty());
        assert!(source.is_closed());
    }

    #[tokio::test]
    async fn head_cut_short_gets_bad_request() {
        let (result, source) = serve("GET /echo HTTP/1.1\r\nHost: x\r\n", make_handler(echo_length)).await;

        assert!(matches!(result, Err(HttpError::RequestError { .. })));
        assert_eq!(source.written(), b"HTTP/1.1 400 Bad Request\r\n\r\n");
        assert!(source.is_closed());
    }
}
