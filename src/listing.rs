//! # Listing Policy
//!
//! Decides whether a phone may go live on a platform. [`try_list`] runs the checks in a fixed
//! order and the first failure wins:
//!
//! 1. not already listed there ([`ListingError::AlreadyListed`])
//! 2. in stock ([`ListingError::OutOfStock`])
//! 3. profitable at the resolved price ([`ListingError::Unprofitable`])
//! 4. the phone's condition has a label on the platform ([`ListingError::Configuration`])
//!
//! Listing does not touch stock. Both functions mutate the phone they are given; the phone actor
//! runs them on its working copy and commits only on success.

use crate::model::{Phone, Platform};
use crate::pricing::{ConfigurationError, PricingEngine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListingError {
    #[error("Already listed on platform {0}")]
    AlreadyListed(Platform),

    #[error("Cannot list out-of-stock phone on platform {0}")]
    OutOfStock(Platform),

    #[error("Price {price} on platform {platform} is below break-even {break_even}")]
    Unprofitable {
        platform: Platform,
        price: Decimal,
        break_even: Decimal,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// What a successful listing looks like on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingReceipt {
    pub platform: Platform,
    pub price: Decimal,
    pub condition_label: String,
}

pub fn try_list(
    phone: &mut Phone,
    platform: Platform,
    engine: &PricingEngine,
) -> Result<ListingReceipt, ListingError> {
    if phone.is_listed_on(platform) {
        return Err(ListingError::AlreadyListed(platform));
    }
    if phone.stock_quantity == 0 {
        return Err(ListingError::OutOfStock(platform));
    }
    let price = engine.resolve_price(phone, platform);
    if !engine.is_profitable(phone, platform) {
        return Err(ListingError::Unprofitable {
            platform,
            price,
            break_even: engine.break_even(phone, platform),
        });
    }
    let condition_label = engine.condition_label(phone, platform)?.to_string();

    phone.listed_on.insert(platform);
    phone.platform_prices.insert(platform, price);
    Ok(ListingReceipt {
        platform,
        price,
        condition_label,
    })
}

/// Removes the listing if present. Returns whether anything changed.
pub fn unlist(phone: &mut Phone, platform: Platform) -> bool {
    phone.listed_on.remove(&platform)
}

/// Tally of a bulk listing run. Phones already on the platform count as failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkListOutcome {
    pub success: usize,
    pub failed: usize,
}
