//! Error types for the action log actor.

use crate::model::LogId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LogError {
    /// Entries are append-only; updates and deletes are refused.
    #[error("Log entry {0} is immutable")]
    Immutable(LogId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}
