//! Runtime orchestration and lifecycle management.
//!
//! - **Actor lifecycle**: hydrating, starting and shutting down the phone and log actors
//! - **Dependency wiring**: the phone actor gets the pricing engine and a log client as context
//! - **Observability setup**: initializing tracing
//!
//! # Main Components
//!
//! - [`InventorySystem`] - starts both actors from [`Settings`](crate::settings::Settings) or
//!   from explicit stores
//! - [`setup_tracing`] - installs the `tracing` subscriber

pub mod inventory_system;
pub mod tracing;

pub use inventory_system::*;
pub use self::tracing::*;
