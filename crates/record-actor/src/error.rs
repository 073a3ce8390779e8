//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Record-specific failures travel boxed inside
//! [`FrameworkError::EntityError`] so the generic client stays independent of each record's error
//! enum; domain clients unbox them with [`FrameworkError::into_entity_error`].

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl FrameworkError {
    /// Recovers the typed record error, or hands the framework error back unchanged.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of widgets")]
    struct WidgetError;

    #[test]
    fn entity_error_round_trips_through_the_box() {
        let err = FrameworkError::EntityError(Box::new(WidgetError));
        assert_eq!(err.into_entity_error::<WidgetError>().unwrap(), WidgetError);
    }

    #[test]
    fn foreign_errors_are_handed_back() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = err.into_entity_error::<WidgetError>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));

        let closed = FrameworkError::ActorClosed.into_entity_error::<WidgetError>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }
}
