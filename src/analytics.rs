//! Search, pagination and dashboard figures.
//!
//! These are read-side reductions over a snapshot of phones taken from the phone actor; nothing
//! here mutates state.

use crate::model::{Condition, Phone, Platform};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Narrows the inventory. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneFilter {
    /// Compared case-insensitively.
    pub brand: Option<String>,
    pub condition: Option<Condition>,
    /// Matches phones currently listed on the platform.
    pub platform: Option<Platform>,
}

impl PhoneFilter {
    pub fn brand(brand: impl Into<String>) -> Self {
        Self {
            brand: Some(brand.into()),
            ..Self::default()
        }
    }

    pub fn condition(condition: Condition) -> Self {
        Self {
            condition: Some(condition),
            ..Self::default()
        }
    }

    pub fn matches(&self, phone: &Phone) -> bool {
        let brand_ok = self
            .brand
            .as_ref()
            .map_or(true, |b| b.trim().to_lowercase() == phone.brand.to_lowercase());
        let condition_ok = self.condition.map_or(true, |c| c == phone.condition);
        let platform_ok = self.platform.map_or(true, |p| phone.is_listed_on(p));
        brand_ok && condition_ok && platform_ok
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneQuery {
    #[serde(default)]
    pub filter: PhoneFilter,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PhoneQuery {
    fn default() -> Self {
        Self {
            filter: PhoneFilter::default(),
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PhoneQuery {
    pub fn new(filter: PhoneFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn page(mut self, skip: usize, limit: usize) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhonePage {
    /// Matches before pagination.
    pub total_items: usize,
    pub items: Vec<Phone>,
}

/// Slices already-filtered phones in id order.
pub fn paginate(mut phones: Vec<Phone>, skip: usize, limit: usize) -> PhonePage {
    phones.sort_by_key(|p| p.id);
    let total_items = phones.len();
    let items = phones.into_iter().skip(skip).take(limit).collect();
    PhonePage { total_items, items }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    pub total_phones: usize,
    pub total_stock_units: u64,
    /// Sum of `base_price * stock_quantity`.
    pub total_inventory_value: Decimal,
    /// Stock units per brand.
    pub stock_by_brand: BTreeMap<String, u64>,
    /// Stock units per condition.
    pub stock_by_condition: BTreeMap<Condition, u64>,
    /// Number of phones listed on each platform.
    pub listed_by_platform: BTreeMap<Platform, usize>,
}

impl DashboardAnalytics {
    pub fn summarize<'a>(phones: impl IntoIterator<Item = &'a Phone>) -> Self {
        phones
            .into_iter()
            .fold(DashboardAnalytics::default(), |mut acc, phone| {
                let units = u64::from(phone.stock_quantity);
                acc.total_phones += 1;
                acc.total_stock_units += units;
                acc.total_inventory_value += phone.base_price * Decimal::from(phone.stock_quantity);
                *acc.stock_by_brand.entry(phone.brand.clone()).or_default() += units;
                *acc.stock_by_condition.entry(phone.condition).or_default() += units;
                for platform in &phone.listed_on {
                    *acc.listed_by_platform.entry(*platform).or_default() += 1;
                }
                acc
            })
    }
}
