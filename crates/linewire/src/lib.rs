//! # linewire
//!
//! Newline-delimited text messaging over duplex byte streams.
//!
//! This crate provides:
//! - `LineReader`: a restartable background read loop that notifies a
//!   weakly held `LineDelegate` for every received line
//! - `LineWriter`: a pass-through that sends text through a writable connection
//!
//! Connection contracts and adapters are re-exported from `linewire-core` and
//! `linewire-transport`.

pub mod reader;
pub mod writer;

pub use linewire_core::{LineError, ReadableConnection, Result, WritableConnection};
pub use linewire_transport as transport;
pub use reader::{LineDelegate, LineReader};
pub use writer::LineWriter;
