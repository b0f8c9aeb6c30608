//! Store messages
//!
//! Commands, outcomes and errors for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{NewNote, Note, NoteId, NotePatch};

/// Faults from store operations
///
/// A missing record is never an error; see [`Outcome::NotFound`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Note id space exhausted")]
    IdExhausted,

    #[error("Store channel closed")]
    ChannelClosed,
}

/// Response from store operations
pub type StoreResponse<T> = Result<T, StoreError>;

/// Result of a single-record operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Found(T),
    NotFound,
}

impl<T> Outcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Found(value) => Outcome::Found(f(value)),
            Self::NotFound => Outcome::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Found(value),
            None => Self::NotFound,
        }
    }
}

/// Commands sent to the store actor
#[derive(Debug)]
pub enum StoreCommand {
    Filter {
        search_term: Option<String>,
        reply: oneshot::Sender<StoreResponse<Vec<Note>>>,
    },
    Find {
        id: NoteId,
        reply: oneshot::Sender<StoreResponse<Outcome<Note>>>,
    },
    Create {
        note: NewNote,
        reply: oneshot::Sender<StoreResponse<Note>>,
    },
    Update {
        id: NoteId,
        patch: NotePatch,
        reply: oneshot::Sender<StoreResponse<Outcome<Note>>>,
    },
    Delete {
        id: NoteId,
        reply: oneshot::Sender<StoreResponse<Outcome<Note>>>,
    },
    Len {
        reply: oneshot::Sender<StoreResponse<usize>>,
    },
    Shutdown,
}
