use std::cmp;
use std::io;

use bytes::{Buf, Bytes, BytesMut};

use super::{ByteSource, eof_before_line, not_connected};

/// A [`ByteSource`] over an in-memory buffer.
///
/// Reads consume `data`, writes are collected and can be inspected with
/// [`MemorySource::written`]. Return semantics match [`super::ConnSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Bytes,
    written: BytesMut,
    closed: bool,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into(), written: BytesMut::new(), closed: false }
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> &[u8] {
        &self.data
    }

    /// Everything written to this source so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl ByteSource for MemorySource {
    async fn read_line(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed {
            return Err(not_connected());
        }
        if buf.is_empty() {
            return Ok(0);
        }
        if self.data.is_empty() {
            return Err(eof_before_line());
        }

        let scan = cmp::min(buf.len(), self.data.len());
        match self.data[..scan].iter().position(|b| *b == b'\n') {
            Some(pos) => {
                buf[..pos].copy_from_slice(&self.data[..pos]);
                self.data.advance(pos + 1);
                Ok(pos)
            }
            None => {
                buf[..scan].copy_from_slice(&self.data[..scan]);
                self.data.advance(scan);
                Ok(scan)
            }
        }
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed {
            return Err(not_connected());
        }
        let n = cmp::min(buf.len(), self.data.len());
        self.data.copy_to_slice(&mut buf[..n]);
        Ok(n)
    }

    async fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(not_connected());
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> io::Result<()> {
        if self.closed {
            return Err(not_connected());
        }
        Ok(())
    }

    async fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
