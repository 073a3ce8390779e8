//! # Record Trait
//!
//! The `Record` trait is the contract every aggregate (phones, log entries, ...) implements to be
//! owned by a [`RecordActor`](crate::RecordActor). It names the id, DTO, action and error types and
//! provides the lifecycle hooks the actor drives.
//!
//! # Copy-on-write hooks
//! Mutating hooks (`on_create`, `on_update`, `handle_action`) always run against a *working copy*.
//! The actor persists the copy and swaps it into its map only after the hook returned `Ok`, so a
//! failing hook never leaves a half-applied record behind.
//!
//! # Provided Methods (Hooks)
//! - [`Record::on_create`]
//! - [`Record::on_delete`]
//! - [`Record::on_committed`]
//!
//! The defaults do nothing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Identifier handed out from the actor's monotonically increasing sequence.
///
/// The actor resumes the sequence at `max(sequence) + 1` after hydrating from its store.
pub trait SequentialId:
    Copy + Eq + Ord + Hash + Send + Sync + Display + Debug + 'static
{
    fn from_sequence(seq: u32) -> Self;
    fn sequence(&self) -> u32;
}

/// What was committed, passed to [`Record::on_committed`].
#[derive(Debug)]
pub enum Change<'a, T: Record> {
    Created,
    Updated,
    Deleted,
    Acted(&'a T::ActionResult),
}

#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    type Id: SequentialId;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Record-specific operations beyond CRUD (e.g. listing a phone on a platform).
    type Action: Send + Sync + Debug;

    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected through [`RecordActor::run`](crate::RecordActor::run).
    /// Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per record type. It travels boxed inside
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and can be recovered with
    /// [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> Self::Id;

    /// Build the record from the id and payload. Validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Runs on the freshly built record before it is persisted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the record is removed. Returning an error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Runs after a change reached the store and the in-memory map.
    ///
    /// The change already happened, so this hook cannot fail the request. Side effects such as
    /// audit entries go here so that they only ever describe committed state.
    async fn on_committed(&self, _change: Change<'_, Self>, _ctx: &Self::Context) {}
}
