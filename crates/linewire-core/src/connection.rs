//! Connection contracts
//!
//! The read and write directions of a duplex text transport are separate
//! capabilities so that a reader and a writer can own them independently.

use crate::error::Result;
use async_trait::async_trait;

/// Read side of a line transport
#[async_trait]
pub trait ReadableConnection: Send {
    /// Read one line, without its terminator
    ///
    /// Fails with `LineError::ConnectionClosed` once the transport has reached
    /// end-of-stream. A closed connection never yields an empty line.
    async fn readline(&mut self) -> Result<String>;
}

/// Write side of a line transport
#[async_trait]
pub trait WritableConnection: Send {
    /// Send text as one or more lines
    async fn writeline(&mut self, line: &str) -> Result<()>;

    /// Close the write side of the transport
    async fn close(&mut self) -> Result<()>;
}

#[async_trait]
impl<T: ReadableConnection + ?Sized> ReadableConnection for Box<T> {
    async fn readline(&mut self) -> Result<String> {
        (**self).readline().await
    }
}

#[async_trait]
impl<T: WritableConnection + ?Sized> WritableConnection for Box<T> {
    async fn writeline(&mut self, line: &str) -> Result<()> {
        (**self).writeline(line).await
    }

    async fn close(&mut self) -> Result<()> {
        (**self).close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;

    struct Countdown(u32);

    #[async_trait]
    impl ReadableConnection for Countdown {
        async fn readline(&mut self) -> Result<String> {
            if self.0 == 0 {
                return Err(LineError::ConnectionClosed);
            }
            self.0 -= 1;
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_boxed_connection_forwards_reads() {
        let mut conn: Box<dyn ReadableConnection> = Box::new(Countdown(2));

        assert_eq!(conn.readline().await.unwrap(), "1");
        assert_eq!(conn.readline().await.unwrap(), "0");
        assert!(matches!(
            conn.readline().await,
            Err(LineError::ConnectionClosed)
        ));
    }
}
