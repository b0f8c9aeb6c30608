//! JSON API over the note store
//!
//! Path routing, request body whitelisting and validation, and the mapping of
//! store outcomes onto response statuses. Independent of any HTTP framework;
//! see [`crate::server`] for the network front end.

mod error;
mod request;
mod router;

pub use error::{ApiError, MISSING_TITLE};
pub use request::{ApiRequest, ApiResponse, Method, Status};
pub use router::{NOTES_PATH, NotesApi, SEARCH_PARAM};
