//! Line writer

use linewire_core::{Result, WritableConnection};

/// Writes lines to a connection
pub struct LineWriter<C> {
    connection: C,
}

impl<C: WritableConnection> LineWriter<C> {
    /// Create a writer that owns `connection`
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Write text over the connection
    pub async fn write(&mut self, data: &str) -> Result<()> {
        self.connection.writeline(data).await
    }

    /// Close the underlying connection
    pub async fn close(&mut self) -> Result<()> {
        self.connection.close().await
    }

    /// Unwrap the underlying connection
    pub fn into_inner(self) -> C {
        self.connection
    }
}
