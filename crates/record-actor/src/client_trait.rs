//! # DomainClient Trait
//!
//! Shared read/delete surface for record-specific client wrappers. A wrapper supplies its inner
//! [`RecordClient`] and an error mapping; `get`, `list` and `delete` come for free.
use crate::{FrameworkError, Record, RecordClient};
use async_trait::async_trait;

/// # Example
///
/// ```rust
/// use record_actor::{DomainClient, FrameworkError, Record, RecordClient, SequentialId};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// struct TagId(u32);
/// impl std::fmt::Display for TagId {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "tag_{}", self.0) }
/// }
/// impl SequentialId for TagId {
///     fn from_sequence(seq: u32) -> Self { TagId(seq) }
///     fn sequence(&self) -> u32 { self.0 }
/// }
///
/// #[derive(Clone, Debug)] struct Tag { id: TagId }
/// #[derive(Debug, thiserror::Error)]
/// enum TagError { #[error("tag actor unavailable: {0}")] Unavailable(String) }
///
/// #[async_trait]
/// impl Record for Tag {
///     type Id = TagId; type Create = (); type Update = ();
///     type Action = (); type ActionResult = (); type Context = (); type Error = TagError;
///     fn id(&self) -> TagId { self.id }
///     fn from_create_params(id: TagId, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient { inner: RecordClient<Tag> }
///
/// #[async_trait]
/// impl DomainClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &RecordClient<Tag> { &self.inner }
///     fn map_error(e: FrameworkError) -> TagError { TagError::Unavailable(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     let _ = client.get(TagId(1)).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait DomainClient<T: Record>: Send + Sync {
    type Error: Send + Sync;

    fn inner(&self) -> &RecordClient<T>;

    /// Map framework errors to the record-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
