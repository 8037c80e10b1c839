//! TCP transport for linewire connections

use crate::stream::{StreamReadConnection, StreamWriteConnection};
use linewire_core::{LineError, Result};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::info;

/// TCP read side
pub type TcpReadConnection = StreamReadConnection<OwnedReadHalf>;

/// TCP write side
pub type TcpWriteConnection = StreamWriteConnection<OwnedWriteHalf>;

/// Split a connected TCP stream into read and write connections
pub fn split(stream: TcpStream) -> (TcpReadConnection, TcpWriteConnection) {
    let (read_half, write_half) = stream.into_split();
    (
        StreamReadConnection::new(read_half),
        StreamWriteConnection::new(write_half),
    )
}

/// Connect to a TCP endpoint
pub async fn connect<A: ToSocketAddrs>(
    addr: A,
) -> Result<(TcpReadConnection, TcpWriteConnection)> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| LineError::Transport(format!("TCP connect failed: {}", e)))?;

    if let Ok(peer) = stream.peer_addr() {
        info!("Connected to {}", peer);
    }

    Ok(split(stream))
}
