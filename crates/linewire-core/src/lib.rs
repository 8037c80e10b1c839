//! # linewire-core
//!
//! Core contracts for line-oriented transports.
//!
//! This crate provides the pieces every other linewire crate builds on:
//! - `ReadableConnection` / `WritableConnection` traits
//! - The `LineError` taxonomy and `Result` alias

pub mod connection;
pub mod error;

pub use connection::{ReadableConnection, WritableConnection};
pub use error::{LineError, Result};
