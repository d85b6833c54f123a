//! Fire-and-forget persistence.
//!
//! Snapshots are queued on an unbounded channel and written by a single
//! background task, in order. Callers never wait on a write. A failed write
//! is logged and dropped; the next snapshot overwrites both keys anyway.

use std::sync::Arc;

use mantra_counter_core::Snapshot;
use mantra_counter_store::Storage;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::StorageKeys;
use crate::error::{CounterError, Result};

enum Command {
    Write(Snapshot),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer task.
pub(crate) struct Persister {
    tx: mpsc::UnboundedSender<Command>,
    handle: JoinHandle<()>,
}

impl Persister {
    /// Spawn the writer on the current tokio runtime.
    pub(crate) fn spawn<S: Storage + 'static>(storage: Arc<S>, keys: StorageKeys) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(storage, keys, rx));
        Self { tx, handle }
    }

    /// Queue a snapshot for writing. Never blocks.
    pub(crate) fn enqueue(&self, snapshot: Snapshot) {
        if self.tx.send(Command::Write(snapshot)).is_err() {
            tracing::error!(
                count = snapshot.count,
                target_count = snapshot.target.get(),
                "persistence writer is gone, snapshot dropped"
            );
        }
    }

    /// Wait until everything queued before this call has been attempted.
    pub(crate) async fn flush(&self) {
        let (reply, done) = oneshot::channel();
        if self.tx.send(Command::Flush(reply)).is_ok() {
            // A dropped reply means the writer exited, so nothing is pending.
            let _ = done.await;
        }
    }

    /// Close the queue and wait for the writer to drain it.
    pub(crate) async fn shutdown(self) -> Result<()> {
        let Self { tx, handle } = self;
        drop(tx);
        handle
            .await
            .map_err(|e| CounterError::WriterStopped(e.to_string()))
    }
}

async fn run<S: Storage>(
    storage: Arc<S>,
    keys: StorageKeys,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Write(snapshot) => write(storage.as_ref(), &keys, snapshot).await,
            Command::Flush(reply) => {
                let _ = reply.send(());
            }
        }
    }
    tracing::debug!("persistence writer stopped");
}

async fn write<S: Storage + ?Sized>(storage: &S, keys: &StorageKeys, snapshot: Snapshot) {
    let record = snapshot.to_record();
    let items = [
        (keys.count.as_str(), record.count.unwrap_or_default()),
        (keys.target.as_str(), record.target.unwrap_or_default()),
    ];

    match storage.set_items(&items).await {
        Ok(()) => {
            tracing::debug!(
                count = snapshot.count,
                target_count = snapshot.target.get(),
                "saved counter state"
            );
        }
        Err(source) => {
            let error = CounterError::StorageWrite { source };
            tracing::error!(error = %error, "failed to save counter state");
        }
    }
}
