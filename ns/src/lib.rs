//! notestore - in-memory notes store with a simulated asynchronous backend
//!
//! The store keeps a small collection of notes in process memory and behaves
//! like a remote datastore: every operation is asynchronous, completes exactly
//! once, and reports either a value, a not-found, or a fault.
//!
//! # Modules
//!
//! - [`domain`] - `Note`, ids, seeds
//! - [`state`] - the `NoteStore` actor and its collection
//! - [`api`] - routing, validation and status mapping for `/api/notes`
//! - [`server`] - actix-web front end
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//!
//! # Example
//!
//! ```ignore
//! use notestore::{NoteStore, StoreOptions, NewNote, builtin_seed};
//!
//! let store = NoteStore::initialize(builtin_seed(), StoreOptions::default())?;
//! let note = store.create(NewNote::new("groceries").with_content("milk")).await?;
//! let hits = store.filter(Some("groc")).await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use api::{ApiError, ApiRequest, ApiResponse, Method, NotesApi, Status};
pub use config::Config;
pub use domain::{NewNote, Note, NoteId, NotePatch, SeedNote, builtin_seed};
pub use state::{Latency, NoteStore, Outcome, StoreError, StoreOptions, StoreResponse};
