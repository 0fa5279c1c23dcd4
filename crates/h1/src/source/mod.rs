//! Byte-oriented access to a duplex connection.
//!
//! Everything above this module (start-line, header fields, body framing) only
//! ever talks to a [`ByteSource`]. Two implementations are provided:
//!
//! - [`ConnSource`]: backed by a live `AsyncRead + AsyncWrite` connection
//! - [`MemorySource`]: backed by an in-memory buffer, used by tests and benches
//!
//! Both share the same return semantics so the same decoding code and the same
//! test suite run against either of them.
//!
//! # EOF semantics
//!
//! - [`ByteSource::read_line`] returns the bytes seen before EOF when there are
//!   any, and fails with [`io::ErrorKind::UnexpectedEof`] when EOF arrives
//!   before the first byte.
//! - [`ByteSource::read`] returns `0` at EOF.
//! - After [`ByteSource::close`] every read or write fails with
//!   [`io::ErrorKind::NotConnected`].

mod conn_source;
mod memory_source;

pub use conn_source::ConnSource;
pub use memory_source::MemorySource;

use std::io;

/// Line and fixed-length read primitive over a duplex byte connection.
pub trait ByteSource: Send {
    /// Reads up to, but excluding, the next LF byte into `buf`.
    ///
    /// The LF is consumed. When `buf` fills up before an LF is seen, reading
    /// stops and the remaining bytes of the line stay in the source; callers
    /// must treat a line that fills the whole buffer as suspect.
    fn read_line(&mut self, buf: &mut [u8]) -> impl Future<Output = io::Result<usize>> + Send;

    /// Best-effort fill of `buf`, returning how many bytes were read.
    ///
    /// A single call may return fewer bytes than requested even when more are
    /// on the way. Returns `0` at EOF.
    fn read(&mut self, buf: &mut [u8]) -> impl Future<Output = io::Result<usize>> + Send;

    /// Writes some bytes of `buf` to the connection.
    fn write(&mut self, buf: &[u8]) -> impl Future<Output = io::Result<usize>> + Send;

    /// Flushes buffered writes down to the connection.
    fn flush(&mut self) -> impl Future<Output = io::Result<()>> + Send;

    /// Releases the underlying connection.
    ///
    /// Only the first call has an effect, later calls return `Ok(())`.
    fn close(&mut self) -> impl Future<Output = io::Result<()>> + Send;

    /// Returns true once [`ByteSource::close`] has been called.
    fn is_closed(&self) -> bool;

    /// Reads exactly `buf.len()` bytes, looping over [`ByteSource::read`].
    fn read_exact(&mut self, buf: &mut [u8]) -> impl Future<Output = io::Result<()>> + Send {
        async move {
            let mut filled = 0;
            while filled < buf.len() {
                let n = self.read(&mut buf[filled..]).await?;
                if n == 0 {
                    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "source ended before buffer was filled"));
                }
                filled += n;
            }
            Ok(())
        }
    }

    /// Writes the whole of `buf`, looping over [`ByteSource::write`].
    fn write_all(&mut self, buf: &[u8]) -> impl Future<Output = io::Result<()>> + Send {
        async move {
            let mut written = 0;
            while written < buf.len() {
                let n = self.write(&buf[written..]).await?;
                if n == 0 {
                    return Err(io::Error::from(io::ErrorKind::WriteZero));
                }
                written += n;
            }
            Ok(())
        }
    }
}

pub(crate) fn not_connected() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "source already closed")
}

pub(crate) fn eof_before_line() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "source ended before a line was read")
}
