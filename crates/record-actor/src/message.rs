//! # Generic Messages
//!
//! Requests sent from a [`RecordClient`](crate::RecordClient) to its
//! [`RecordActor`](crate::RecordActor), each carrying a one-shot channel for the reply.

use crate::entity::Record;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Read-side filter evaluated inside the actor against each record.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// The CRUD surface plus a record-specific `Action`.
///
/// - **Create** returns the committed record, including whatever `on_create` derived.
/// - **Get** / **List** return clones; they never observe a half-applied change.
/// - **Update** returns the record as committed.
/// - **Delete** returns the record that was removed.
/// - **Action** returns the record's `ActionResult`.
pub enum RecordRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Option<Predicate<T>>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: Record> RecordRequest<T> {
    /// Short operation name used in logs and mock diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordRequest::Create { .. } => "create",
            RecordRequest::Get { .. } => "get",
            RecordRequest::List { .. } => "list",
            RecordRequest::Update { .. } => "update",
            RecordRequest::Delete { .. } => "delete",
            RecordRequest::Action { .. } => "action",
        }
    }
}
