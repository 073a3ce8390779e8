//! Error types for the Phone actor.

use crate::listing::ListingError;
use crate::model::PhoneId;
use crate::validation::{describe, FieldError};
use thiserror::Error;

/// Errors that can occur during phone operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PhoneError {
    /// One or more fields are invalid. Every problem is reported, not just the first.
    #[error("Phone validation error: {}", describe(.0))]
    Validation(Vec<FieldError>),

    /// The requested phone was not found.
    #[error("Phone not found: {0}")]
    NotFound(PhoneId),

    /// A listing rule refused the operation.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// The action log refused an entry or is gone.
    #[error("Action log error: {0}")]
    Log(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl PhoneError {
    /// Names of the fields a validation error complains about.
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            PhoneError::Validation(errors) => errors.iter().map(|e| e.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Vec<FieldError>> for PhoneError {
    fn from(errors: Vec<FieldError>) -> Self {
        PhoneError::Validation(errors)
    }
}

impl From<crate::log_actor::LogError> for PhoneError {
    fn from(e: crate::log_actor::LogError) -> Self {
        PhoneError::Log(e.to_string())
    }
}
