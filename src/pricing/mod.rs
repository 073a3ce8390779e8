//! # Pricing Rules
//!
//! Everything needed to turn a phone's base price into a sell price per platform:
//!
//! - [`conditions`] - [`ConditionMapper`], the per-platform condition vocabularies
//! - [`fees`] - [`FeeModel`] and [`FeeSchedule`], platform fees as `rate * price + flat`
//! - [`engine`] - [`PricingEngine`], overrides, break-even and profitability
//!
//! All money is `rust_decimal::Decimal` and rounded to cents. Computed prices round **up** so
//! that the seller never nets less than the base price; fees round half-up.
//!
//! ```rust
//! use phone_dash::model::{Condition, Phone, PhoneCreate, PhoneId, Platform};
//! use phone_dash::pricing::PricingEngine;
//! use rust_decimal::Decimal;
//!
//! let engine = PricingEngine::default();
//! let phone = Phone::new(
//!     PhoneId(1),
//!     PhoneCreate::new("Pixel 7", "Google", Condition::Good, 3, Decimal::new(10000, 2)),
//! );
//! assert_eq!(engine.resolve_price(&phone, Platform::X), Decimal::new(11112, 2));
//! assert!(engine.is_profitable(&phone, Platform::X));
//! ```

pub mod conditions;
pub mod engine;
pub mod fees;

pub use conditions::ConditionMapper;
pub use engine::PricingEngine;
pub use fees::{FeeModel, FeeSchedule};

use crate::model::{Condition, Platform};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Pricing configuration that cannot be used. Raised at startup, or when a label lookup misses.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("No fee schedule configured for platform {0}")]
    MissingFeeSchedule(Platform),

    #[error("Invalid fee schedule for platform {platform}: {reason}")]
    InvalidFeeSchedule { platform: Platform, reason: String },

    #[error("Condition {condition} has no label on platform {platform}")]
    MissingConditionLabel {
        condition: Condition,
        platform: Platform,
    },

    #[error("Unknown platform '{0}' in pricing configuration")]
    UnknownPlatform(String),

    #[error("Unknown condition '{0}' in pricing configuration")]
    UnknownCondition(String),

    #[error("Minimum margin must not be negative, got {0}")]
    NegativeMargin(Decimal),
}

/// Rounds to cents, halves away from zero.
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the next cent; amounts already on a cent are unchanged.
pub fn round_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::AwayFromZero)
}
