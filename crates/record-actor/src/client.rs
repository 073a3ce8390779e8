//! # Generic Client
//!
//! `RecordClient<T>` is the cheap-to-clone sending half of a [`RecordActor`](crate::RecordActor).
//! Each call sends one [`RecordRequest`] and awaits its one-shot reply.

use crate::entity::Record;
use crate::error::FrameworkError;
use crate::message::{Response, RecordRequest};
use tokio::sync::{mpsc, oneshot};

pub struct RecordClient<T: Record> {
    sender: mpsc::Sender<RecordRequest<T>>,
}

impl<T: Record> Clone for RecordClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> RecordClient<T> {
    pub fn new(sender: mpsc::Sender<RecordRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> RecordRequest<T> + Send,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| RecordRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| RecordRequest::Get { id, respond_to })
            .await
    }

    /// Every record, in id order.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| RecordRequest::List {
            filter: None,
            respond_to,
        })
        .await
    }

    /// Records matching `filter`, in id order. The filter runs inside the actor.
    pub async fn list_where(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| RecordRequest::List {
            filter: Some(Box::new(filter)),
            respond_to,
        })
        .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| RecordRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    /// Removes the record and returns it as it was.
    pub async fn delete(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| RecordRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| RecordRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
