use std::cmp;
use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};
use tracing::{info, trace};

use super::{ByteSource, eof_before_line, not_connected};

/// Default capacity of the read and write buffers
const DEFAULT_BUF_SIZE: usize = 8 * 1024;

/// A [`ByteSource`] backed by a live duplex connection.
///
/// Reads go through a [`BufStream`], so a head line costs one buffer scan
/// instead of one I/O call per byte. Bytes that are buffered but not yet
/// consumed by a line read stay available to the following body reads.
#[derive(Debug)]
pub struct ConnSource<S> {
    inner: BufStream<S>,
    closed: bool,
}

impl<S> ConnSource<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self::with_capacity(stream, DEFAULT_BUF_SIZE)
    }

    pub fn with_capacity(stream: S, capacity: usize) -> Self {
        Self { inner: BufStream::with_capacity(capacity, capacity, stream), closed: false }
    }
}

impl<S> ByteSource for ConnSource<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_line(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed {
            return Err(not_connected());
        }

        let mut filled = 0;
        while filled < buf.len() {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                if filled == 0 {
                    return Err(eof_before_line());
                }
                break;
            }

            let room = buf.len() - filled;
            let scan = cmp::min(room, available.len());
            if let Some(pos) = available[..scan].iter().position(|b| *b == b'\n') {
                buf[filled..filled + pos].copy_from_slice(&available[..pos]);
                self.inner.consume(pos + 1);
                filled += pos;
                trace!(len = filled, "read line from connection");
                return Ok(filled);
            }

            buf[filled..filled + scan].copy_from_slice(&available[..scan]);
            self.inner.consume(scan);
            filled += scan;
        }

        trace!(len = filled, "line read stopped without LF");
        Ok(filled)
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed {
            return Err(not_connected());
        }
        self.inner.read(buf).await
    }

    async fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(not_connected());
        }
        self.inner.write(buf).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        if self.closed {
            return Err(not_connected());
        }
        self.inner.flush().await
    }

    async fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let flushed = self.inner.flush().await;
        let shut_down = self.inner.get_mut().shutdown().await;
        flushed.and(shut_down)?;
        info!("connection closed");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
