//! Fire-and-forget persistence.
//!
//! Saves are queued on an unbounded channel and applied in order by a
//! single writer thread, so a state transition never waits on storage.
//! Failures are logged and dropped; the in-memory state stays
//! authoritative and the next save of the same key reconciles storage.

use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::oneshot;

use crate::storage::KvStore;

struct Write {
    key: &'static str,
    value: String,
}

pub struct Persister {
    tx: Option<UnboundedSender<Write>>,
    done: Option<oneshot::Receiver<()>>,
}

impl Persister {
    /// Move `store` onto a dedicated writer thread.
    ///
    /// The writer is a plain OS thread rather than a runtime task, so it
    /// neither blocks the runtime nor holds back a paused test clock.
    pub fn spawn<S: KvStore>(store: S) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Write>();
        let (done_tx, done_rx) = oneshot::channel();
        let spawned = std::thread::Builder::new()
            .name("focusroom-persist".into())
            .spawn(move || {
                while let Some(write) = rx.blocking_recv() {
                    if let Err(e) = store.set(write.key, &write.value) {
                        tracing::warn!(key = write.key, error = %e, "failed to persist value");
                    }
                }
                let _ = done_tx.send(());
            });
        match spawned {
            Ok(_) => Self {
                tx: Some(tx),
                done: Some(done_rx),
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to start persistence writer, saves disabled");
                Self { tx: None, done: None }
            }
        }
    }

    pub fn save(&self, key: &'static str, value: String) {
        let Some(tx) = &self.tx else {
            tracing::warn!(key, "persister closed, dropping write");
            return;
        };
        if tx.send(Write { key, value }).is_err() {
            tracing::warn!(key, "persistence writer stopped, dropping write");
        }
    }

    pub fn save_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.save(key, json),
            Err(e) => tracing::warn!(key, error = %e, "failed to serialize value"),
        }
    }

    /// Close the queue and wait until every pending write has been applied.
    pub async fn flush(&mut self) {
        self.tx.take();
        if let Some(done) = self.done.take() {
            if done.await.is_err() {
                tracing::warn!("persistence writer exited early");
            }
        }
    }
}
