//! Ordered note collection owned by the store actor
//!
//! Keeps notes in insertion order and tracks the next id to hand out. The
//! counter only moves forward, so ids of deleted notes are never reused.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{FIRST_NOTE_ID, NewNote, Note, NoteId, NotePatch, SeedNote};

use super::messages::{StoreError, StoreResponse};

#[derive(Debug)]
pub struct NoteCollection {
    notes: Vec<Note>,
    next_id: u64,
}

impl NoteCollection {
    /// Build a collection from seed entries, assigning ids to entries without one.
    ///
    /// Missing ids continue after the largest supplied id, or start at
    /// [`FIRST_NOTE_ID`] when no entry carries one.
    pub fn from_seed(seed: Vec<SeedNote>) -> StoreResponse<Self> {
        debug!(count = seed.len(), "NoteCollection::from_seed: called");
        let mut seen = HashSet::new();
        for entry in &seed {
            if entry.title.is_empty() {
                return Err(StoreError::InvalidSeed("seed note with empty title".to_string()));
            }
            if let Some(id) = entry.id {
                if id.get() == 0 {
                    return Err(StoreError::InvalidSeed("id must be positive".to_string()));
                }
                if !seen.insert(id) {
                    return Err(StoreError::InvalidSeed(format!("duplicate id {}", id)));
                }
            }
        }

        let mut next_id = match seen.iter().max() {
            Some(max) => max.get().checked_add(1).ok_or(StoreError::IdExhausted)?,
            None => FIRST_NOTE_ID,
        };

        let mut notes = Vec::with_capacity(seed.len());
        for entry in seed {
            let id = match entry.id {
                Some(id) => id,
                None => {
                    let id = NoteId::new(next_id);
                    next_id = next_id.checked_add(1).ok_or(StoreError::IdExhausted)?;
                    id
                }
            };
            notes.push(Note {
                id,
                title: entry.title,
                content: entry.content,
            });
        }

        Ok(Self { notes, next_id })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes whose title contains `search_term` (case-sensitive), in insertion order.
    /// `None` or an empty term returns everything.
    pub fn filter(&self, search_term: Option<&str>) -> Vec<Note> {
        match search_term {
            Some(term) if !term.is_empty() => self.notes.iter().filter(|n| n.title.contains(term)).cloned().collect(),
            _ => self.notes.clone(),
        }
    }

    pub fn find(&self, id: NoteId) -> Option<Note> {
        self.notes.iter().find(|n| n.id == id).cloned()
    }

    /// Append a note under the next unused id
    pub fn create(&mut self, note: NewNote) -> StoreResponse<Note> {
        let id = NoteId::new(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(StoreError::IdExhausted)?;
        let note = Note {
            id,
            title: note.title,
            content: note.content,
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    pub fn update(&mut self, id: NoteId, patch: NotePatch) -> Option<Note> {
        let note = self.notes.iter_mut().find(|n| n.id == id)?;
        note.apply(patch);
        Some(note.clone())
    }

    pub fn delete(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }
}
