//! # Phone Dash
//!
//! Inventory, pricing and marketplace listing for a refurbished-phone reseller.
//!
//! Phones are priced per marketplace (platforms X, Y and Z), each with its own fee structure and
//! condition vocabulary. A phone can go live on a platform only if it is in stock and the resolved
//! price still covers its base price (plus a configurable minimum margin) after fees. Every change
//! is recorded in an append-only action log.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor per record type
//! Phones and log entries are each owned by a [`RecordActor`](record_actor::RecordActor) from the
//! `record-actor` crate. The actor is the single writer; reads go through the same mailbox and
//! return clones. Hooks run on a working copy that is persisted and swapped in only when
//! everything succeeded, so a failed operation leaves no trace.
//!
//! ### 2. Typed errors end to end
//! Each actor has its own `thiserror` enum ([`PhoneError`](phone_actor::PhoneError),
//! [`LogError`](log_actor::LogError)). The framework carries them boxed; the clients downcast
//! them back, so callers can match on `PhoneError::Listing(ListingError::OutOfStock(_))`.
//!
//! ### 3. Context injection
//! The phone actor is started with a [`PhoneContext`](phone_actor::PhoneContext): the shared
//! [`PricingEngine`](pricing::PricingEngine) and a log client. Rules stay pure functions of the
//! phone and the engine.
//!
//! ## Module Tour
//!
//! - [`model`] - phones, platforms, conditions and log entries
//! - [`pricing`] - fee model, condition labels, price resolution and profitability
//! - [`validation`] - field checks shared by create, update and import
//! - [`listing`] - the listing policy
//! - [`phone_actor`], [`log_actor`] - [`Record`](record_actor::Record) implementations
//! - [`clients`] - [`PhoneClient`](clients::PhoneClient) and [`LogClient`](clients::LogClient),
//!   including the bulk operations
//! - [`analytics`] - search, pagination and dashboard figures
//! - [`import`] - CSV bulk import
//! - [`settings`] - layered configuration
//! - [`lifecycle`] - [`InventorySystem`](lifecycle::InventorySystem) and tracing setup
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! # with a settings file
//! cargo run -- config/local.toml
//! ```

pub mod analytics;
pub mod clients;
pub mod import;
pub mod lifecycle;
pub mod listing;
pub mod log_actor;
pub mod model;
pub mod phone_actor;
pub mod pricing;
pub mod settings;
pub mod validation;
