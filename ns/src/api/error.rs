//! API error taxonomy
//!
//! Validation failures are detected here before the store is called. Store
//! faults are wrapped and reported as a generic server error.

use serde_json::json;
use thiserror::Error;

use crate::state::StoreError;

use super::request::{ApiResponse, Status};

pub const MISSING_TITLE: &str = "Missing 'title' in request body";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing 'title' in request body")]
    MissingTitle,

    #[error("Field '{0}' must be a string")]
    InvalidField(&'static str),

    #[error("Malformed JSON in request body")]
    MalformedBody(String),

    #[error("Malformed query string")]
    MalformedQuery(String),

    #[error("Not Found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::MissingTitle | Self::InvalidField(_) | Self::MalformedBody(_) | Self::MalformedQuery(_) => {
                Status::BadRequest
            }
            Self::NotFound => Status::NotFound,
            Self::Store(_) => Status::InternalServerError,
        }
    }

    /// Message shown to the client; store faults are not leaked
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn into_response(self) -> ApiResponse {
        ApiResponse::json(self.status(), json!({ "message": self.message() }))
    }
}
