use std::error::Error;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::StatusCode;
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use micro_h1::connection::HttpConnection;
use micro_h1::handler::make_handler;
use micro_h1::protocol::{MessageHead, ResponseHead, status_response};
use micro_h1::source::ConnSource;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return;
    }

    let addr = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_owned());

    info!(%addr, "start listening");
    let tcp_listener = match TcpListener::bind(&addr).await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    let handler = Arc::new(make_handler(log_request));

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };
        info!(%remote_addr, "a new connection has been accepted");

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let mut connection = HttpConnection::new(ConnSource::new(tcp_stream));
            match connection.process(handler).await {
                Ok(()) => info!(%remote_addr, "finished process, connection shutdown"),
                Err(e) => error!(%remote_addr, cause = %e, "service has error, connection shutdown"),
            }
        });
    }
}

async fn log_request(head: MessageHead, body: Bytes) -> Result<ResponseHead, Box<dyn Error + Send + Sync>> {
    info!(
        method = ?head.method(),
        target = ?head.target(),
        version = %head.version(),
        headers = head.headers().len(),
        body_len = body.len(),
        "receiving request"
    );

    let mut response = status_response(StatusCode::OK);
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    Ok(response)
}
