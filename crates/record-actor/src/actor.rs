//! # Record Actor
//!
//! `RecordActor<T>` is the single writer for all records of type `T`. It owns the in-memory map,
//! the id sequence and the store handle, and processes one request at a time in its own Tokio task.
//!
//! # Usage Pattern
//!
//! 1. **Create**: `RecordActor::new(capacity, store)` returns the actor and its client.
//! 2. **Hydrate** (optional): `actor.hydrate().await?` loads the store eagerly so startup errors
//!    surface before anything is spawned. `run` hydrates lazily otherwise.
//! 3. **Run**: spawn `actor.run(context)`; the context is injected into every hook.
//!
//! ```rust
//! use record_actor::{MemoryStore, Record, RecordActor, SequentialId};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
//! struct NoteId(u32);
//! impl std::fmt::Display for NoteId {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "note_{}", self.0) }
//! }
//! impl SequentialId for NoteId {
//!     fn from_sequence(seq: u32) -> Self { NoteId(seq) }
//!     fn sequence(&self) -> u32 { self.0 }
//! }
//!
//! #[derive(Clone, Debug)] struct Note { id: NoteId, text: String }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl Record for Note {
//!     type Id = NoteId; type Create = String; type Update = String;
//!     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn id(&self) -> NoteId { self.id }
//!     fn from_create_params(id: NoteId, text: String) -> Result<Self, NoteError> { Ok(Self { id, text }) }
//!     async fn on_update(&mut self, text: String, _: &()) -> Result<(), NoteError> { self.text = text; Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = RecordActor::<Note>::new(8, MemoryStore::new());
//!     tokio::spawn(actor.run(()));
//!
//!     let note = client.create("hello".to_string()).await.unwrap();
//!     assert_eq!(note.id, NoteId(1));
//! }
//! ```
//!
//! # Commit protocol
//!
//! Mutations run on a clone of the stored record. The actor then writes the clone to the store and
//! only on success replaces the entry in its map, so a hook error or a store error leaves both the
//! map and the store untouched. [`Record::on_committed`] runs last.

use crate::client::RecordClient;
use crate::entity::{Change, Record, SequentialId};
use crate::error::FrameworkError;
use crate::message::{Predicate, RecordRequest};
use crate::store::RecordStore;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub struct RecordActor<T: Record> {
    receiver: mpsc::Receiver<RecordRequest<T>>,
    store: Box<dyn RecordStore<T>>,
    records: BTreeMap<T::Id, T>,
    next_seq: u32,
    hydrated: bool,
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

impl<T: Record> RecordActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait while it is full.
    pub fn new(
        buffer_size: usize,
        store: impl RecordStore<T> + 'static,
    ) -> (Self, RecordClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: Box::new(store),
            records: BTreeMap::new(),
            next_seq: 1,
            hydrated: false,
        };
        (actor, RecordClient::new(sender))
    }

    fn entity_type() -> &'static str {
        std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
    }

    /// Loads every persisted record and resumes the id sequence after the highest one.
    ///
    /// Returns the number of records loaded. Calling it twice is a no-op.
    pub async fn hydrate(&mut self) -> Result<usize, FrameworkError> {
        if self.hydrated {
            return Ok(self.records.len());
        }
        let loaded = self.store.load_all().await?;
        self.records = loaded.into_iter().map(|r| (r.id(), r)).collect();
        self.next_seq = self
            .records
            .keys()
            .map(|id| id.sequence())
            .max()
            .map_or(1, |max| max + 1);
        self.hydrated = true;
        info!(
            entity_type = Self::entity_type(),
            size = self.records.len(),
            next_seq = self.next_seq,
            "Hydrated"
        );
        Ok(self.records.len())
    }

    /// Runs the event loop until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = Self::entity_type();
        if let Err(e) = self.hydrate().await {
            // Dropping the receiver closes the mailbox; clients see ActorClosed.
            error!(entity_type, error = %e, "Hydration failed, actor not started");
            return;
        }
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RecordRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                RecordRequest::Get { id, respond_to } => {
                    let item = self.records.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                RecordRequest::List { filter, respond_to } => {
                    let items = self.list(filter.as_ref());
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                RecordRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                RecordRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                RecordRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let _ = respond_to.send(self.act(id, action, &context).await);
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    fn list(&self, filter: Option<&Predicate<T>>) -> Vec<T> {
        self.records
            .values()
            .filter(|r| filter.map_or(true, |f| f(*r)))
            .cloned()
            .collect()
    }

    async fn create(&mut self, params: T::Create, ctx: &T::Context) -> Result<T, FrameworkError> {
        let entity_type = Self::entity_type();
        let id = T::Id::from_sequence(self.next_seq);

        let mut item = T::from_create_params(id, params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            entity_error(e)
        })?;
        item.on_create(ctx).await.map_err(|e| {
            warn!(entity_type, error = %e, "on_create failed");
            entity_error(e)
        })?;
        self.store.upsert(&item).await.map_err(|e| {
            error!(entity_type, %id, error = %e, "Store write failed");
            FrameworkError::from(e)
        })?;

        self.next_seq += 1;
        self.records.insert(id, item.clone());
        info!(entity_type, %id, size = self.records.len(), "Created");
        item.on_committed(Change::Created, ctx).await;
        Ok(item)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = Self::entity_type();
        let Some(current) = self.records.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mut working = current.clone();
        working.on_update(update, ctx).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Update failed");
            entity_error(e)
        })?;
        self.commit(working.clone()).await?;
        info!(entity_type, %id, "Updated");
        working.on_committed(Change::Updated, ctx).await;
        Ok(working)
    }

    async fn delete(&mut self, id: T::Id, ctx: &T::Context) -> Result<T, FrameworkError> {
        let entity_type = Self::entity_type();
        let Some(current) = self.records.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        current.on_delete(ctx).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            entity_error(e)
        })?;
        self.store.remove(&id).await.map_err(|e| {
            error!(entity_type, %id, error = %e, "Store remove failed");
            FrameworkError::from(e)
        })?;

        let removed = self
            .records
            .remove(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        info!(entity_type, %id, size = self.records.len(), "Deleted");
        removed.on_committed(Change::Deleted, ctx).await;
        Ok(removed)
    }

    async fn act(
        &mut self,
        id: T::Id,
        action: T::Action,
        ctx: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = Self::entity_type();
        let Some(current) = self.records.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mut working = current.clone();
        let result = working.handle_action(action, ctx).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Action failed");
            entity_error(e)
        })?;
        self.commit(working.clone()).await?;
        info!(entity_type, %id, "Action ok");
        working.on_committed(Change::Acted(&result), ctx).await;
        Ok(result)
    }

    async fn commit(&mut self, item: T) -> Result<(), FrameworkError> {
        let id = item.id();
        self.store.upsert(&item).await.map_err(|e| {
            error!(entity_type = Self::entity_type(), %id, error = %e, "Store write failed");
            FrameworkError::from(e)
        })?;
        self.records.insert(id, item);
        Ok(())
    }
}
