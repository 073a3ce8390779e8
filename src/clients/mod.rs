//! # Clients
//!
//! Typed wrappers around the generic [`RecordClient`](record_actor::RecordClient) for each
//! actor. They map framework errors back to the domain errors and host the client-side bulk
//! operations.

pub mod log_client;
pub mod phone_client;

pub use log_client::LogClient;
pub use phone_client::{PhoneClient, PriceUpdateOutcome};
