//! Line adapters over tokio byte streams
//!
//! Wraps any `AsyncRead` / `AsyncWrite` so it satisfies the linewire
//! connection contracts. Used directly for pipes and in-memory streams, and
//! through the TCP and Unix helpers for sockets.

use async_trait::async_trait;
use linewire_core::{LineError, ReadableConnection, Result, WritableConnection};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

/// Readable connection over a byte stream
pub struct StreamReadConnection<R> {
    reader: BufReader<R>,
    /// Bytes of the line currently being read, kept across cancelled reads
    pending: Vec<u8>,
    /// Set at end-of-stream or after a read error
    closed: bool,
}

impl<R: AsyncRead> StreamReadConnection<R> {
    /// Wrap the read half of a stream
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pending: Vec::new(),
            closed: false,
        }
    }

    /// Unwrap the underlying stream, discarding buffered data
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> ReadableConnection for StreamReadConnection<R> {
    async fn readline(&mut self) -> Result<String> {
        if self.closed {
            return Err(LineError::ConnectionClosed);
        }

        // read_until appends to `pending`, so a dropped call resumes where it left off
        match self.reader.read_until(b'\n', &mut self.pending).await {
            Ok(0) if self.pending.is_empty() => {
                self.closed = true;
                Err(LineError::ConnectionClosed)
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.pending).trim_end().to_string();
                self.pending.clear();
                debug!("Read line: {}", line);
                Ok(line)
            }
            Err(e) => {
                warn!("Stream read failed, treating connection as closed: {}", e);
                self.closed = true;
                self.pending.clear();
                Err(LineError::ConnectionClosed)
            }
        }
    }
}

/// Writable connection over a byte stream
pub struct StreamWriteConnection<W> {
    writer: W,
}

impl<W: AsyncWrite> StreamWriteConnection<W> {
    /// Wrap the write half of a stream
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the underlying stream
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> WritableConnection for StreamWriteConnection<W> {
    async fn writeline(&mut self, line: &str) -> Result<()> {
        for line in split_lines(line) {
            let mut framed = String::with_capacity(line.len() + 1);
            framed.push_str(line);
            framed.push('\n');

            self.writer
                .write_all(framed.as_bytes())
                .await
                .map_err(|e| LineError::Transport(format!("Write failed: {}", e)))?;

            // Each line reaches the transport before the next one starts
            self.writer
                .flush()
                .await
                .map_err(|e| LineError::Transport(format!("Flush failed: {}", e)))?;

            debug!("Wrote line: {}", line);
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| LineError::Transport(format!("Shutdown failed: {}", e)))
    }
}

/// Split text into trimmed, non-empty physical lines
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
