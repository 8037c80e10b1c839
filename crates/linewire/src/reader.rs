//! Background line reader
//!
//! `LineReader` owns a readable connection and runs at most one read loop at a
//! time. The loop runs on a spawned tokio task:
//! - Reads one line at a time from the connection
//! - Notifies the current `LineDelegate`, if one is still alive
//! - Yields once per line so other tasks get a turn
//! - Exits quietly when stopped, or with the connection's error when it fails
//!
//! The reader only holds a `Weak` reference to its delegate. Dropping the last
//! `Arc` to a delegate unsubscribes it; lines read afterwards are discarded
//! until a new delegate is set.

use linewire_core::{LineError, ReadableConnection, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::{Mutex as AsyncMutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Receives the lines read by a `LineReader`
pub trait LineDelegate: Send + Sync {
    /// Called once per received line, in arrival order
    ///
    /// Runs on the read loop; a slow implementation delays the next read.
    fn on_message(&self, message: &str);
}

/// Lifecycle of a reader's read loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    Idle,
    Running,
    /// Cancellation requested, loop not yet unwound
    Stopping,
}

/// Handles to the active read loop
struct Session {
    cancel: CancellationToken,
    /// Flips to `true` once the loop task has fully exited
    finished: watch::Receiver<bool>,
}

struct Lifecycle {
    state: ReaderState,
    session: Option<Session>,
}

/// State shared between the reader and its loop task
struct Shared<C> {
    connection: AsyncMutex<C>,
    delegate: Mutex<Option<Weak<dyn LineDelegate>>>,
    lifecycle: Mutex<Lifecycle>,
}

impl<C> Shared<C> {
    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn delegate_slot(&self) -> MutexGuard<'_, Option<Weak<dyn LineDelegate>>> {
        self.delegate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Upgrade the delegate reference, if the delegate is still alive
    fn delegate(&self) -> Option<Arc<dyn LineDelegate>> {
        self.delegate_slot().as_ref().and_then(Weak::upgrade)
    }
}

/// Reads lines from a connection on a background task
pub struct LineReader<C> {
    shared: Arc<Shared<C>>,
}

impl<C: ReadableConnection + 'static> LineReader<C> {
    /// Create an idle reader that owns `connection`
    pub fn new(connection: C) -> Self {
        Self {
            shared: Arc::new(Shared {
                connection: AsyncMutex::new(connection),
                delegate: Mutex::new(None),
                lifecycle: Mutex::new(Lifecycle {
                    state: ReaderState::Idle,
                    session: None,
                }),
            }),
        }
    }

    /// Whether a read loop is running and has not been asked to stop
    pub fn is_reading(&self) -> bool {
        self.shared.lifecycle().state == ReaderState::Running
    }

    /// Store a weak reference to `delegate`
    ///
    /// Replaces any previous delegate. A loop that is already running picks
    /// the new delegate up from the next line on.
    pub fn set_delegate<D: LineDelegate + 'static>(&self, delegate: &Arc<D>) {
        let delegate: Weak<D> = Arc::downgrade(delegate);
        *self.shared.delegate_slot() = Some(delegate);
    }

    /// Forget the current delegate
    pub fn clear_delegate(&self) {
        *self.shared.delegate_slot() = None;
    }

    /// Start reading lines from the connection
    ///
    /// Spawns the read loop and waits for it to finish, so this only returns
    /// once reading has ended. Run it on its own task and call `stop` to end
    /// it. Dropping the returned future also cancels the loop.
    ///
    /// # Errors
    /// - `LineError::AlreadyStarted` if a read loop is running or stopping
    /// - `LineError::ConnectionClosed` once the connection has closed
    pub async fn start(&self) -> Result<()> {
        let cancel = CancellationToken::new();
        let (finished_tx, finished_rx) = watch::channel(false);

        {
            let mut lifecycle = self.shared.lifecycle();
            if lifecycle.state != ReaderState::Idle {
                warn!("Reader start rejected while {:?}", lifecycle.state);
                return Err(LineError::AlreadyStarted);
            }
            lifecycle.state = ReaderState::Running;
            lifecycle.session = Some(Session {
                cancel: cancel.clone(),
                finished: finished_rx,
            });
        }
        debug!("Line reader started");

        let exit = SessionExit {
            shared: self.shared.clone(),
            finished: finished_tx,
        };
        let handle = tokio::spawn(read_loop(self.shared.clone(), cancel.clone(), exit));

        // Cancelled if this future is dropped before the loop ends
        let _cancel_on_drop = cancel.drop_guard();

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            // Aborted by runtime shutdown
            Err(_) => Ok(()),
        }
    }

    /// Stop reading lines from the connection
    ///
    /// Cancels the read loop and waits until it has fully exited. No delegate
    /// is notified after this returns. Does nothing if not reading.
    pub async fn stop(&self) {
        let mut finished = {
            let mut lifecycle = self.shared.lifecycle();
            let Some(session) = lifecycle.session.as_ref() else {
                return;
            };
            let finished = session.finished.clone();
            session.cancel.cancel();
            lifecycle.state = ReaderState::Stopping;
            finished
        };
        debug!("Line reader stopping");

        // An Err means the loop is gone as well
        let _ = finished.wait_for(|done| *done).await;
        debug!("Line reader stopped");
    }
}

/// Returns the reader to idle when the loop task ends, however it ends
struct SessionExit<C> {
    shared: Arc<Shared<C>>,
    finished: watch::Sender<bool>,
}

impl<C> Drop for SessionExit<C> {
    fn drop(&mut self) {
        {
            let mut lifecycle = self.shared.lifecycle();
            lifecycle.state = ReaderState::Idle;
            lifecycle.session = None;
        }
        self.finished.send_replace(true);
    }
}

/// The read loop. Cancellation ends it with `Ok(())`.
async fn read_loop<C: ReadableConnection>(
    shared: Arc<Shared<C>>,
    cancel: CancellationToken,
    _exit: SessionExit<C>,
) -> Result<()> {
    // Released before `_exit` runs, so a restarted loop never waits on it
    let mut connection = shared.connection.lock().await;

    loop {
        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            line = connection.readline() => line,
        };

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!("Read loop ended: {}", e);
                return Err(e);
            }
        };

        match shared.delegate() {
            Some(delegate) => delegate.on_message(&line),
            None => debug!("No delegate, dropping line: {}", line),
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::task::yield_now() => {}
        }
    }

    debug!("Read loop cancelled");
    Ok(())
}
