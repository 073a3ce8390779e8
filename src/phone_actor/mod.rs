//! # Phone Actor
//!
//! The single writer for the phone inventory. Every create, update, delete, listing change and
//! price recomputation goes through this actor, one request at a time.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](record_actor::Record) implementation for [`Phone`]
//! - [`error`] - [`PhoneError`] type for type-safe error handling
//! - [`actions`] - [`PhoneAction`] and [`PhoneActionResult`] for listing and repricing
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Context
//!
//! The actor is started with a [`PhoneContext`]: the shared [`PricingEngine`] and a
//! [`LogClient`] for audit entries.
//!
//! ```rust
//! use phone_dash::model::{Condition, PhoneCreate, Platform};
//! use phone_dash::phone_actor::{self, PhoneContext};
//! use phone_dash::{log_actor, pricing::PricingEngine};
//! use record_actor::MemoryStore;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (log_actor, logs) = log_actor::new(16, MemoryStore::new());
//!     let (phone_actor, phones) = phone_actor::new(16, MemoryStore::new(), logs.clone());
//!     tokio::spawn(log_actor.run(()));
//!     tokio::spawn(phone_actor.run(PhoneContext::new(Arc::new(PricingEngine::default()), logs)));
//!
//!     let params = PhoneCreate::new("Pixel 7", "Google", Condition::Good, 2, Decimal::new(10000, 2));
//!     let phone = phones.create_phone(params).await?;
//!     let receipt = phones.list_on_platform(phone.id, Platform::X).await?;
//!     assert_eq!(receipt.price, Decimal::new(11112, 2));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{LogClient, PhoneClient};
use crate::model::Phone;
use crate::pricing::PricingEngine;
use record_actor::{RecordActor, RecordStore};
use std::sync::Arc;

/// Runtime dependencies injected into every phone hook.
#[derive(Clone)]
pub struct PhoneContext {
    pub engine: Arc<PricingEngine>,
    pub log: LogClient,
}

impl PhoneContext {
    pub fn new(engine: Arc<PricingEngine>, log: LogClient) -> Self {
        Self { engine, log }
    }
}

/// Creates a new Phone actor and its client.
///
/// The client appends batch summaries to `log`; the actor gets its own log client through
/// [`PhoneContext`] when it is started.
pub fn new(
    capacity: usize,
    store: impl RecordStore<Phone> + 'static,
    log: LogClient,
) -> (RecordActor<Phone>, PhoneClient) {
    let (actor, client) = RecordActor::new(capacity, store);
    (actor, PhoneClient::new(client, log))
}
