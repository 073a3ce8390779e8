//! # Record Actor
//!
//! Building blocks for single-writer record stores on Tokio. Each record type gets one actor that
//! owns every instance of that type, serializes all reads and writes through its mailbox, and
//! writes committed changes through a pluggable [`RecordStore`].
//!
//! ## Layers
//!
//! 1. **Record Layer** ([`Record`]) - the domain type, its DTOs, actions and lifecycle hooks
//! 2. **Runtime Layer** ([`RecordActor`]) - message loop, id sequence, copy-on-write commits
//! 3. **Interface Layer** ([`RecordClient`], [`DomainClient`]) - typed request/reply
//! 4. **Persistence Layer** ([`RecordStore`]) - [`MemoryStore`] or [`JsonFileStore`]
//!
//! Business rules live in the record's hooks; the actor guarantees that a hook only ever sees a
//! working copy and that nothing is committed unless the hook and the store both succeed.
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`RecordActor::run`], not to the constructor. A record whose hooks
//! need another actor receives that actor's client as its context:
//!
//! ```rust,ignore
//! let (entry_actor, entry_client) = RecordActor::<Entry>::new(64, MemoryStore::new());
//! let (item_actor, item_client) = RecordActor::<Item>::new(64, MemoryStore::new());
//!
//! tokio::spawn(entry_actor.run(()));
//! // Item hooks append entries after each commit.
//! tokio::spawn(item_actor.run(entry_client));
//! ```
//!
//! ## Ids
//!
//! Ids come from a per-actor sequence starting at 1 and are never reused within a run. After
//! hydration the sequence resumes at one past the highest stored id.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real [`RecordClient`] from scripted expectations, so domain
//! clients can be tested without spawning actors. Restart behaviour can be tested by handing a
//! clone of one [`MemoryStore`] to two actors in sequence.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

pub use actor::RecordActor;
pub use client::RecordClient;
pub use client_trait::DomainClient;
pub use entity::{Change, Record, SequentialId};
pub use error::FrameworkError;
pub use message::{Predicate, RecordRequest, Response};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreError};
