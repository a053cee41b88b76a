//! Errors surfaced to whoever talks to the engine from outside.

use thiserror::Error;

use crate::request::ValidationError;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid order: {0}")]
    Invalid(#[from] ValidationError),
}
