//! # Action Log Actor
//!
//! Append-only audit trail of every change made to the inventory. Entries are numbered in the
//! order the actor accepts them and survive the phones they describe.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](record_actor::Record) implementation for
//!   [`ActionLogEntry`](crate::model::ActionLogEntry); updates and deletes are refused
//! - [`error`] - [`LogError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use entity::LogAction;
pub use error::*;

use crate::clients::LogClient;
use crate::model::ActionLogEntry;
use record_actor::{RecordActor, RecordStore};

/// Creates a new log actor and its client.
pub fn new(
    capacity: usize,
    store: impl RecordStore<ActionLogEntry> + 'static,
) -> (RecordActor<ActionLogEntry>, LogClient) {
    let (actor, client) = RecordActor::new(capacity, store);
    (actor, LogClient::new(client))
}
