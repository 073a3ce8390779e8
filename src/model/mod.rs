//! Pure data structures (DTOs) implementing the [`Record`](record_actor::Record) trait.

pub mod action_log;
pub mod phone;
pub mod platform;

pub use action_log::*;
pub use phone::*;
pub use platform::*;
