//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. The filter comes from
//! `RUST_LOG` when set, otherwise from the configured default (`logging.filter`).
//!
//! The format hides module paths (`with_target(false)`); the record actor tags its events with
//! `entity_type` instead, so lines stay short:
//!
//! ```text
//! INFO Hydrated entity_type="Phone" size=3 next_seq=4
//! INFO Created entity_type="Phone" id=phone_4 size=4
//! INFO Action ok entity_type="Phone" id=phone_4
//! WARN Action failed entity_type="Phone" id=phone_2 error=Cannot list out-of-stock phone on platform Y
//! ```
//!
//! ```bash
//! # Full request payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the actor plumbing
//! RUST_LOG=record_actor=debug cargo run
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
