//! Background rebuilds.
//!
//! Invalidation events from the host are sent to a [`RefreshHandle`]. The
//! worker drains whatever else queued up meanwhile, then runs a single
//! [`LibraryIndex::rebuild`] on the blocking pool, off the request path.

use crate::snapshot::LibraryIndex;
use anyhow::{anyhow, Result};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshReason {
    LibraryChanged,
    PlaylistsChanged,
    Manual,
}

impl fmt::Display for RefreshReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshReason::LibraryChanged => write!(f, "library changed"),
            RefreshReason::PlaylistsChanged => write!(f, "playlists changed"),
            RefreshReason::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Clone)]
pub struct RefreshHandle {
    sender: mpsc::UnboundedSender<RefreshReason>,
    generation: watch::Receiver<u64>,
}

impl RefreshHandle {
    /// Queues a rebuild. Returns `false` once the worker has stopped.
    pub fn request(&self, reason: RefreshReason) -> bool {
        self.sender.send(reason).is_ok()
    }

    /// Generation of the last snapshot the worker published, 0 if none.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Waits until the worker has published `generation` or a later one.
    pub async fn wait_for_generation(&mut self, generation: u64) -> Result<u64> {
        let published = self
            .generation
            .wait_for(|published| *published >= generation)
            .await
            .map_err(|_| anyhow!("Refresh worker stopped"))?;
        Ok(*published)
    }
}

struct RefreshWorker {
    index: Arc<LibraryIndex>,
    receiver: mpsc::UnboundedReceiver<RefreshReason>,
    generation: watch::Sender<u64>,
    shutdown_token: CancellationToken,
}

impl RefreshWorker {
    async fn run(mut self) {
        info!("Starting refresh worker");
        loop {
            tokio::select! {
                reason = self.receiver.recv() => {
                    match reason {
                        Some(reason) => self.refresh(reason).await,
                        None => break,
                    }
                }
                _ = self.shutdown_token.cancelled() => {
                    info!("Refresh worker received shutdown signal");
                    break;
                }
            }
        }
        info!("Refresh worker stopped");
    }

    async fn refresh(&mut self, reason: RefreshReason) {
        let mut coalesced = 0;
        while self.receiver.try_recv().is_ok() {
            coalesced += 1;
        }
        debug!(
            "Refreshing catalog ({}), {} more requests coalesced",
            reason, coalesced
        );

        let index = self.index.clone();
        match tokio::task::spawn_blocking(move || index.rebuild()).await {
            Ok(Ok(snapshot)) => {
                self.generation.send_replace(snapshot.generation());
            }
            // Already reported by the index, the previous snapshot stays.
            Ok(Err(_)) => {}
            Err(e) => error!("Refresh task failed: {}", e),
        }
    }
}

/// Starts the refresh worker on the current tokio runtime. It stops when
/// `shutdown_token` is cancelled or every handle is dropped.
pub fn spawn_refresh_worker(
    index: Arc<LibraryIndex>,
    shutdown_token: CancellationToken,
) -> (RefreshHandle, JoinHandle<()>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let initial = index.published().map_or(0, |s| s.generation());
    let (generation_tx, generation_rx) = watch::channel(initial);
    let worker = RefreshWorker {
        index,
        receiver,
        generation: generation_tx,
        shutdown_token,
    };
    let join_handle = tokio::spawn(worker.run());
    (
        RefreshHandle {
            sender,
            generation: generation_rx,
        },
        join_handle,
    )
}
