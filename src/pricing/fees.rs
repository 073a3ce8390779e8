//! Platform fee structures.
//!
//! A fee is `rate * sale_price + flat`. Percentage-only, flat-only and combined fees are the same
//! shape with one part set to zero.

use super::{round_half_up, round_up, ConfigurationError};
use crate::model::Platform;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fraction of the sale price, `0 <= rate < 1`.
    pub rate: Decimal,
    pub flat: Decimal,
}

impl FeeSchedule {
    pub fn new(rate: Decimal, flat: Decimal) -> Self {
        Self { rate, flat }
    }

    pub fn validate(&self, platform: Platform) -> Result<(), ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidFeeSchedule {
            platform,
            reason: reason.to_string(),
        };
        if self.rate < Decimal::ZERO || self.rate >= Decimal::ONE {
            return Err(invalid("rate must be in [0, 1)"));
        }
        if self.flat < Decimal::ZERO {
            return Err(invalid("flat fee must not be negative"));
        }
        Ok(())
    }
}

/// One validated [`FeeSchedule`] per platform.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeModel {
    schedules: [FeeSchedule; 3],
}

impl FeeModel {
    /// Requires a valid schedule for every platform.
    pub fn new(schedules: &BTreeMap<Platform, FeeSchedule>) -> Result<Self, ConfigurationError> {
        let lookup = |platform: Platform| -> Result<FeeSchedule, ConfigurationError> {
            let schedule = schedules
                .get(&platform)
                .copied()
                .ok_or(ConfigurationError::MissingFeeSchedule(platform))?;
            schedule.validate(platform)?;
            Ok(schedule)
        };
        Ok(Self {
            schedules: [lookup(Platform::X)?, lookup(Platform::Y)?, lookup(Platform::Z)?],
        })
    }

    pub fn schedule(&self, platform: Platform) -> FeeSchedule {
        self.schedules[platform.index()]
    }

    /// Fee charged when selling at `sale_price`, rounded half-up to cents.
    pub fn fee_for(&self, sale_price: Decimal, platform: Platform) -> Decimal {
        let s = self.schedule(platform);
        round_half_up(sale_price * s.rate + s.flat)
    }

    /// Smallest cent price at which the seller still nets `base_price` after fees.
    pub fn compute_platform_price(&self, base_price: Decimal, platform: Platform) -> Decimal {
        let s = self.schedule(platform);
        round_up((base_price + s.flat) / (Decimal::ONE - s.rate))
    }

    /// Fee charged when the phone sells at its computed price.
    pub fn compute_fee(&self, base_price: Decimal, platform: Platform) -> Decimal {
        self.fee_for(self.compute_platform_price(base_price, platform), platform)
    }

    /// What the seller receives from a sale at `sale_price`. Not rounded.
    pub fn net_proceeds(&self, sale_price: Decimal, platform: Platform) -> Decimal {
        let s = self.schedule(platform);
        sale_price * (Decimal::ONE - s.rate) - s.flat
    }
}

impl Default for FeeModel {
    fn default() -> Self {
        Self {
            schedules: [
                FeeSchedule::new(Decimal::new(10, 2), Decimal::ZERO),
                FeeSchedule::new(Decimal::new(8, 2), Decimal::new(200, 2)),
                FeeSchedule::new(Decimal::new(12, 2), Decimal::ZERO),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn percentage_fee_price() {
        let fees = FeeModel::default();
        assert_eq!(fees.compute_platform_price(d("100.00"), Platform::X), d("111.12"));
        assert_eq!(fees.fee_for(d("111.12"), Platform::X), d("11.11"));
        assert_eq!(fees.compute_fee(d("100.00"), Platform::X), d("11.11"));
    }

    #[test]
    fn combined_fee_price() {
        let fees = FeeModel::default();
        // (50 + 2) / 0.92 = 56.5217...
        assert_eq!(fees.compute_platform_price(d("50.00"), Platform::Y), d("56.53"));
        assert_eq!(fees.fee_for(d("40.00"), Platform::Y), d("5.20"));
        assert_eq!(fees.net_proceeds(d("40.00"), Platform::Y), d("34.8000"));
    }

    #[test]
    fn computed_price_nets_at_least_base() {
        let fees = FeeModel::default();
        for cents in [1_i64, 99, 4_999, 10_000, 12_345, 99_999] {
            let base = Decimal::new(cents, 2);
            for platform in Platform::ALL {
                let price = fees.compute_platform_price(base, platform);
                assert!(fees.net_proceeds(price, platform) >= base, "{platform} {base}");
                let round_trip = price - fees.compute_fee(base, platform);
                assert!((round_trip - base).abs() <= d("0.01"), "{platform} {base}");
            }
        }
    }

    #[test]
    fn price_strictly_increases_with_base() {
        let fees = FeeModel::default();
        for platform in Platform::ALL {
            let mut previous = fees.compute_platform_price(d("0.01"), platform);
            for cents in 2..2_000 {
                let price = fees.compute_platform_price(Decimal::new(cents, 2), platform);
                assert!(price > previous, "{platform} at {cents} cents");
                previous = price;
            }
        }
    }

    #[test]
    fn price_is_monotonic_in_rate() {
        let base = d("80.00");
        let mut previous = Decimal::ZERO;
        for pct in 0..95 {
            let schedules: BTreeMap<_, _> = Platform::ALL
                .into_iter()
                .map(|p| (p, FeeSchedule::new(Decimal::new(pct, 2), Decimal::ZERO)))
                .collect();
            let fees = FeeModel::new(&schedules).unwrap();
            let price = fees.compute_platform_price(base, Platform::Z);
            assert!(price >= previous);
            previous = price;
        }
    }

    #[test]
    fn schedules_are_validated() {
        let mut schedules: BTreeMap<_, _> = Platform::ALL
            .into_iter()
            .map(|p| (p, FeeModel::default().schedule(p)))
            .collect();
        assert!(FeeModel::new(&schedules).is_ok());

        schedules.insert(Platform::Y, FeeSchedule::new(Decimal::ONE, Decimal::ZERO));
        assert!(matches!(
            FeeModel::new(&schedules),
            Err(ConfigurationError::InvalidFeeSchedule { platform: Platform::Y, .. })
        ));

        schedules.remove(&Platform::Z);
        schedules.insert(Platform::Y, FeeSchedule::new(d("0.08"), d("2.00")));
        assert_eq!(
            FeeModel::new(&schedules),
            Err(ConfigurationError::MissingFeeSchedule(Platform::Z))
        );
    }
}
