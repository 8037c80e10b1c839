//! Unix socket transport for linewire connections

use crate::stream::{StreamReadConnection, StreamWriteConnection};
use linewire_core::{LineError, Result};
use std::path::Path;
use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tracing::info;

/// Unix socket read side
pub type UnixReadConnection = StreamReadConnection<OwnedReadHalf>;

/// Unix socket write side
pub type UnixWriteConnection = StreamWriteConnection<OwnedWriteHalf>;

/// Split a connected Unix stream into read and write connections
pub fn split(stream: UnixStream) -> (UnixReadConnection, UnixWriteConnection) {
    let (read_half, write_half) = stream.into_split();
    (
        StreamReadConnection::new(read_half),
        StreamWriteConnection::new(write_half),
    )
}

/// Connect to a Unix socket
pub async fn connect<P: AsRef<Path>>(
    path: P,
) -> Result<(UnixReadConnection, UnixWriteConnection)> {
    let path = path.as_ref();
    let stream = UnixStream::connect(path)
        .await
        .map_err(|e| LineError::Transport(format!("Unix connect failed: {}", e)))?;

    info!("Connected to {}", path.display());
    Ok(split(stream))
}
