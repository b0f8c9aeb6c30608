//! Domain types for notestore
//!
//! `Note` is the only record type. Seeds describe the collection the store
//! starts with.

mod note;
mod seed;

pub use note::{NewNote, Note, NoteId, NotePatch};
pub use seed::{FIRST_NOTE_ID, SeedNote, builtin_seed, load_seed_file, resolve_seed};
