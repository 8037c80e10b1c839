//! Transport adapters for linewire
//!
//! This crate provides:
//! - Generic read/write adapters over any tokio byte stream
//! - TCP and Unix socket helpers that split a stream into both directions

pub mod stream;
pub mod tcp;
#[cfg(unix)]
pub mod unix;

pub use stream::{StreamReadConnection, StreamWriteConnection};
pub use tcp::{TcpReadConnection, TcpWriteConnection};
#[cfg(unix)]
pub use unix::{UnixReadConnection, UnixWriteConnection};
