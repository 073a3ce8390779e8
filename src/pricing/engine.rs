//! Per-phone price resolution and profitability.

use super::{round_up, ConditionMapper, ConfigurationError, FeeModel};
use crate::model::{Phone, Platform};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Fee model, condition labels and the minimum margin a listing must keep.
///
/// Shared read-only by the phone actor; build it once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingEngine {
    fees: FeeModel,
    conditions: ConditionMapper,
    min_margin: Decimal,
}

impl PricingEngine {
    /// Validates the condition tables and the margin so misconfiguration fails at startup.
    pub fn new(
        fees: FeeModel,
        conditions: ConditionMapper,
        min_margin: Decimal,
    ) -> Result<Self, ConfigurationError> {
        conditions.validate()?;
        if min_margin < Decimal::ZERO {
            return Err(ConfigurationError::NegativeMargin(min_margin));
        }
        Ok(Self {
            fees,
            conditions,
            min_margin,
        })
    }

    /// Skips validation so tests can exercise lookups against incomplete tables.
    #[cfg(test)]
    pub(crate) fn unchecked(
        fees: FeeModel,
        conditions: ConditionMapper,
        min_margin: Decimal,
    ) -> Self {
        Self {
            fees,
            conditions,
            min_margin,
        }
    }

    pub fn fees(&self) -> &FeeModel {
        &self.fees
    }

    pub fn conditions(&self) -> &ConditionMapper {
        &self.conditions
    }

    pub fn min_margin(&self) -> Decimal {
        self.min_margin
    }

    pub fn auto_price(&self, phone: &Phone, platform: Platform) -> Decimal {
        self.fees.compute_platform_price(phone.base_price, platform)
    }

    /// Manual override if set, computed price otherwise.
    pub fn resolve_price(&self, phone: &Phone, platform: Platform) -> Decimal {
        phone
            .override_for(platform)
            .unwrap_or_else(|| self.auto_price(phone, platform))
    }

    pub fn compute_all_prices(&self, phone: &Phone) -> BTreeMap<Platform, Decimal> {
        Platform::ALL
            .into_iter()
            .map(|p| (p, self.resolve_price(phone, p)))
            .collect()
    }

    /// Stores freshly resolved prices on the phone. Returns whether any price changed.
    pub fn apply_prices(&self, phone: &mut Phone) -> bool {
        let prices = self.compute_all_prices(phone);
        let changed = prices != phone.platform_prices;
        phone.platform_prices = prices;
        changed
    }

    /// Lowest cent price that still keeps the minimum margin on `platform`.
    pub fn break_even(&self, phone: &Phone, platform: Platform) -> Decimal {
        let s = self.fees.schedule(platform);
        round_up((phone.base_price + self.min_margin + s.flat) / (Decimal::ONE - s.rate))
    }

    /// Whether selling at the resolved price nets at least `base_price + min_margin`.
    pub fn is_profitable(&self, phone: &Phone, platform: Platform) -> bool {
        let price = self.resolve_price(phone, platform);
        self.fees.net_proceeds(price, platform) - phone.base_price >= self.min_margin
    }

    pub fn condition_label(
        &self,
        phone: &Phone,
        platform: Platform,
    ) -> Result<&str, ConfigurationError> {
        self.conditions.map_condition(phone.condition, platform)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            fees: FeeModel::default(),
            conditions: ConditionMapper::default(),
            min_margin: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, PhoneCreate, PhoneId};
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn phone(base: &str) -> Phone {
        Phone::new(
            PhoneId(1),
            PhoneCreate::new("Galaxy S21", "Samsung", Condition::Good, 4, d(base)),
        )
    }

    #[test]
    fn auto_price_scenario() {
        let engine = PricingEngine::default();
        let phone = phone("100.00");
        assert_eq!(engine.resolve_price(&phone, Platform::X), d("111.12"));
        assert!(engine.is_profitable(&phone, Platform::X));
        assert_eq!(engine.break_even(&phone, Platform::X), d("111.12"));
    }

    #[test]
    fn low_override_is_unprofitable() {
        let engine = PricingEngine::default();
        let mut phone = phone("50.00");
        phone.manual_overrides.insert(Platform::Y, Some(d("40.00")));

        assert_eq!(engine.resolve_price(&phone, Platform::Y), d("40.00"));
        assert!(!engine.is_profitable(&phone, Platform::Y));
        assert_eq!(engine.break_even(&phone, Platform::Y), d("56.53"));
        // Other platforms keep their computed prices.
        assert!(engine.is_profitable(&phone, Platform::X));
    }

    #[test]
    fn cleared_override_falls_back_to_auto() {
        let engine = PricingEngine::default();
        let mut phone = phone("100.00");
        phone.manual_overrides.insert(Platform::X, None);
        assert_eq!(engine.resolve_price(&phone, Platform::X), d("111.12"));
    }

    #[test]
    fn min_margin_raises_the_bar() {
        let engine = PricingEngine::new(
            FeeModel::default(),
            ConditionMapper::default(),
            d("5.00"),
        )
        .unwrap();
        let phone = phone("100.00");

        // The computed price only covers the base price.
        assert!(!engine.is_profitable(&phone, Platform::X));
        // (100 + 5) / 0.9 = 116.666...
        assert_eq!(engine.break_even(&phone, Platform::X), d("116.67"));

        let mut priced = phone.clone();
        priced.manual_overrides.insert(Platform::X, Some(d("116.67")));
        assert!(engine.is_profitable(&priced, Platform::X));
    }

    #[test]
    fn apply_prices_reports_changes() {
        let engine = PricingEngine::default();
        let mut phone = phone("100.00");
        assert!(engine.apply_prices(&mut phone));
        assert_eq!(phone.platform_prices.len(), 3);
        assert!(!engine.apply_prices(&mut phone));

        phone.base_price = d("120.00");
        assert!(engine.apply_prices(&mut phone));
        assert_eq!(phone.platform_prices[&Platform::Z], d("136.37"));
    }

    #[test]
    fn negative_margin_is_rejected() {
        let result = PricingEngine::new(FeeModel::default(), ConditionMapper::default(), d("-1"));
        assert_eq!(result, Err(ConfigurationError::NegativeMargin(d("-1"))));
    }
}
