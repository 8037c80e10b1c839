//! linewire
//!
//! Line-oriented netcat: prints every line received from the endpoint and
//! sends every line read from stdin.
//! - `linewire host:port` connects over TCP
//! - `linewire unix:/path/to.sock` connects to a Unix socket
//!
//! Without an argument the endpoint comes from `LINEWIRE_ENDPOINT`. See
//! `linewire --help`.

mod config;

use anyhow::Result;
use clap::Parser;
use config::{ClientConfig, Endpoint};
use linewire::transport::tcp;
use linewire::{LineDelegate, LineReader, LineWriter, ReadableConnection, WritableConnection};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Prints received lines to stdout
struct StdoutPrinter;

impl LineDelegate for StdoutPrinter {
    fn on_message(&self, message: &str) {
        println!("{}", message);
    }
}

/// Pump lines in both directions until stdin or the connection ends
async fn run<R, W>(read: R, write: W) -> Result<()>
where
    R: ReadableConnection + 'static,
    W: WritableConnection,
{
    let reader = Arc::new(LineReader::new(read));
    let printer = Arc::new(StdoutPrinter);
    reader.set_delegate(&printer);
    let mut writer = LineWriter::new(write);

    let mut reading = tokio::spawn({
        let reader = reader.clone();
        async move { reader.start().await }
    });

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let outcome = loop {
        tokio::select! {
            joined = &mut reading => break joined?,
            line = stdin.next_line() => match line? {
                Some(line) => writer.write(&line).await?,
                None => {
                    info!("stdin closed, stopping reader");
                    reader.stop().await;
                    break reading.await?;
                }
            },
        }
    };

    if let Err(e) = writer.close().await {
        warn!("Failed to close connection: {}", e);
    }

    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_closed() => {
            info!("Remote closed the connection");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::parse();

    // Logs go to stderr, stdout carries received lines
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Connecting to {:?}", config.endpoint);

    match config.endpoint {
        Endpoint::Tcp(addr) => {
            let (read, write) = tcp::connect(addr.as_str()).await?;
            run(read, write).await
        }
        #[cfg(unix)]
        Endpoint::Unix(path) => {
            let (read, write) = linewire::transport::unix::connect(&path).await?;
            run(read, write).await
        }
        #[cfg(not(unix))]
        Endpoint::Unix(path) => anyhow::bail!(
            "Unix sockets are not supported on this platform: {}",
            path.display()
        ),
    }
}
