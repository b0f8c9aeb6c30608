//! NoteStore - actor that owns the note collection
//!
//! Every operation is a message to a single task that owns the
//! [`NoteCollection`]. Commands are applied one at a time, so each operation is
//! atomic; the reply is then delivered after a simulated backend latency.

use std::time::Duration;

use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::domain::{NewNote, Note, NoteId, NotePatch, SeedNote};

use super::collection::NoteCollection;
use super::messages::{Outcome, StoreCommand, StoreError, StoreResponse};

/// Default command channel capacity
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Simulated backend latency, picked uniformly from `[min_ms, max_ms]` per reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Latency {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Latency {
    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub const fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    pub const fn between(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    fn pick(&self) -> Duration {
        let (lo, hi) = if self.min_ms <= self.max_ms {
            (self.min_ms, self.max_ms)
        } else {
            (self.max_ms, self.min_ms)
        };
        if hi == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

/// Options for [`NoteStore::initialize`]
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub latency: Latency,
    pub channel_buffer: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            latency: Latency::none(),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

/// Handle to send commands to the store actor
///
/// Cloning is cheap; all clones talk to the same collection.
#[derive(Debug, Clone)]
pub struct NoteStore {
    tx: mpsc::Sender<StoreCommand>,
}

impl NoteStore {
    /// Build the collection from `seed` and spawn the owning task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn initialize(seed: Vec<SeedNote>, options: StoreOptions) -> StoreResponse<Self> {
        debug!(seed_len = seed.len(), ?options, "initialize: called");
        let collection = NoteCollection::from_seed(seed)?;
        let count = collection.len();

        let (tx, rx) = mpsc::channel(options.channel_buffer.max(1));
        tokio::spawn(actor_loop(collection, rx, options.latency));

        info!(count, "NoteStore spawned");
        Ok(Self { tx })
    }

    /// All notes, or those whose title contains `search_term`, in insertion order
    pub async fn filter(&self, search_term: Option<&str>) -> StoreResponse<Vec<Note>> {
        debug!(?search_term, "filter: called");
        let search_term = search_term.map(str::to_string);
        self.request(|reply| StoreCommand::Filter { search_term, reply }).await
    }

    pub async fn find(&self, id: NoteId) -> StoreResponse<Outcome<Note>> {
        debug!(%id, "find: called");
        self.request(|reply| StoreCommand::Find { id, reply }).await
    }

    /// Insert a note under a fresh id.
    ///
    /// Callers must ensure `note.title` is non-empty.
    pub async fn create(&self, note: NewNote) -> StoreResponse<Note> {
        debug!(title = %note.title, "create: called");
        self.request(|reply| StoreCommand::Create { note, reply }).await
    }

    pub async fn update(&self, id: NoteId, patch: NotePatch) -> StoreResponse<Outcome<Note>> {
        debug!(%id, ?patch, "update: called");
        self.request(|reply| StoreCommand::Update { id, patch, reply }).await
    }

    /// Remove a note; the removed note is returned on success
    pub async fn delete(&self, id: NoteId) -> StoreResponse<Outcome<Note>> {
        debug!(%id, "delete: called");
        self.request(|reply| StoreCommand::Delete { id, reply }).await
    }

    pub async fn len(&self) -> StoreResponse<usize> {
        debug!("len: called");
        self.request(|reply| StoreCommand::Len { reply }).await
    }

    /// Stop the actor; later calls resolve to [`StoreError::ChannelClosed`]
    pub async fn shutdown(&self) -> StoreResponse<()> {
        debug!("shutdown: called");
        self.tx
            .send(StoreCommand::Shutdown)
            .await
            .map_err(|_| StoreError::ChannelClosed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<StoreResponse<T>>) -> StoreCommand,
    ) -> StoreResponse<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| StoreError::ChannelClosed)?;
        reply_rx.await.map_err(|_| StoreError::ChannelClosed)?
    }
}

/// Send `result` on `reply` after the simulated latency.
///
/// The delay runs on its own task so the actor moves on to the next command.
fn deliver<T: Send + 'static>(reply: oneshot::Sender<StoreResponse<T>>, result: StoreResponse<T>, latency: Latency) {
    let delay = latency.pick();
    if delay.is_zero() {
        let _ = reply.send(result);
        return;
    }
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = reply.send(result);
    });
}

/// The actor loop that owns the collection and processes commands
async fn actor_loop(mut notes: NoteCollection, mut rx: mpsc::Receiver<StoreCommand>, latency: Latency) {
    debug!(?latency, "NoteStore actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::Filter { search_term, reply } => {
                debug!(?search_term, "actor_loop: Filter command");
                let result = notes.filter(search_term.as_deref());
                deliver(reply, Ok(result), latency);
            }

            StoreCommand::Find { id, reply } => {
                debug!(%id, "actor_loop: Find command");
                deliver(reply, Ok(notes.find(id).into()), latency);
            }

            StoreCommand::Create { note, reply } => {
                debug!(title = %note.title, "actor_loop: Create command");
                let result = notes.create(note);
                if let Ok(created) = &result {
                    info!(id = %created.id, "Created note");
                }
                deliver(reply, result, latency);
            }

            StoreCommand::Update { id, patch, reply } => {
                debug!(%id, "actor_loop: Update command");
                deliver(reply, Ok(notes.update(id, patch).into()), latency);
            }

            StoreCommand::Delete { id, reply } => {
                debug!(%id, "actor_loop: Delete command");
                let result: Outcome<Note> = notes.delete(id).into();
                if result.is_found() {
                    info!(%id, "Deleted note");
                }
                deliver(reply, Ok(result), latency);
            }

            StoreCommand::Len { reply } => {
                deliver(reply, Ok(notes.len()), latency);
            }

            StoreCommand::Shutdown => {
                info!("NoteStore shutting down");
                break;
            }
        }
    }

    debug!("NoteStore actor stopped");
}
