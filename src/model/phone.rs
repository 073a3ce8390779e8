//! A refurbished phone in stock.
//!
//! # Record Actor
//! This struct implements the [`Record`](record_actor::Record) trait, so every phone is owned by
//! one [`RecordActor`](record_actor::RecordActor). See the implementation in
//! [`phone_actor::entity`](crate::phone_actor::entity) for details on:
//! - Creation parameters ([`PhoneCreate`])
//! - Update parameters ([`PhoneUpdate`])
//! - Custom actions ([`PhoneAction`](crate::phone_actor::PhoneAction))

use crate::model::{Condition, Platform};
use record_actor::SequentialId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// Type-safe identifier for Phones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhoneId(pub u32);

impl From<u32> for PhoneId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PhoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "phone_{}", self.0)
    }
}

impl SequentialId for PhoneId {
    fn from_sequence(seq: u32) -> Self {
        Self(seq)
    }

    fn sequence(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub id: PhoneId,
    pub model_name: String,
    pub brand: String,
    pub condition: Condition,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    pub stock_quantity: u32,
    pub base_price: Decimal,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// A `Some` price replaces the computed price on that platform.
    #[serde(default)]
    pub manual_overrides: BTreeMap<Platform, Option<Decimal>>,
    /// Last resolved price per platform (override or computed).
    #[serde(default)]
    pub platform_prices: BTreeMap<Platform, Decimal>,
    #[serde(default)]
    pub listed_on: BTreeSet<Platform>,
}

impl Phone {
    /// Builds an unlisted phone without prices; the pricing engine fills `platform_prices`.
    pub fn new(id: PhoneId, params: PhoneCreate) -> Self {
        Self {
            id,
            model_name: params.model_name,
            brand: params.brand,
            condition: params.condition,
            specifications: params.specifications,
            stock_quantity: params.stock_quantity,
            base_price: params.base_price,
            tags: params.tags,
            manual_overrides: params.manual_overrides,
            platform_prices: BTreeMap::new(),
            listed_on: BTreeSet::new(),
        }
    }

    /// The manual price for `platform`, if one is set.
    pub fn override_for(&self, platform: Platform) -> Option<Decimal> {
        self.manual_overrides.get(&platform).copied().flatten()
    }

    pub fn is_listed_on(&self, platform: Platform) -> bool {
        self.listed_on.contains(&platform)
    }
}

/// DTO for Phone creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneCreate {
    pub model_name: String,
    pub brand: String,
    pub condition: Condition,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    pub stock_quantity: u32,
    pub base_price: Decimal,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub manual_overrides: BTreeMap<Platform, Option<Decimal>>,
}

impl PhoneCreate {
    pub fn new(
        model_name: impl Into<String>,
        brand: impl Into<String>,
        condition: Condition,
        stock_quantity: u32,
        base_price: Decimal,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            brand: brand.into(),
            condition,
            specifications: BTreeMap::new(),
            stock_quantity,
            base_price,
            tags: BTreeSet::new(),
            manual_overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, platform: Platform, price: Decimal) -> Self {
        self.manual_overrides.insert(platform, Some(price));
        self
    }
}

/// DTO for Phone updates. `None` leaves a field untouched; maps and sets are replaced whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneUpdate {
    pub model_name: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<Condition>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub stock_quantity: Option<u32>,
    pub base_price: Option<Decimal>,
    pub tags: Option<BTreeSet<String>>,
    pub manual_overrides: Option<BTreeMap<Platform, Option<Decimal>>>,
}

impl PhoneUpdate {
    /// Whether applying this update can change any platform price.
    pub fn touches_prices(&self) -> bool {
        self.base_price.is_some() || self.manual_overrides.is_some()
    }
}
