//! Store with actor pattern
//!
//! NoteStore owns the note collection and processes messages via channels,
//! giving serialized, atomic access from any number of callers.

mod collection;
mod manager;
mod messages;

pub use collection::NoteCollection;
pub use manager::{DEFAULT_CHANNEL_BUFFER, Latency, NoteStore, StoreOptions};
pub use messages::{Outcome, StoreCommand, StoreError, StoreResponse};
