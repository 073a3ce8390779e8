//! Per-platform condition labels.
//!
//! Every marketplace grades phones in its own words ("2 stars (Good)" on Y is "As New" on Z).
//! [`ConditionMapper`] holds one lookup table per platform, loaded from configuration.

use super::ConfigurationError;
use crate::model::{Condition, Platform};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionMapper {
    labels: BTreeMap<Platform, BTreeMap<Condition, String>>,
}

impl ConditionMapper {
    pub fn new(labels: BTreeMap<Platform, BTreeMap<Condition, String>>) -> Self {
        Self { labels }
    }

    /// The platform's label for `condition`.
    pub fn map_condition(
        &self,
        condition: Condition,
        platform: Platform,
    ) -> Result<&str, ConfigurationError> {
        self.labels
            .get(&platform)
            .and_then(|table| table.get(&condition))
            .map(String::as_str)
            .ok_or(ConfigurationError::MissingConditionLabel {
                condition,
                platform,
            })
    }

    /// Fails on the first (platform, condition) pair without a non-blank label.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for platform in Platform::ALL {
            for condition in Condition::ALL {
                let label = self.map_condition(condition, platform)?;
                if label.trim().is_empty() {
                    return Err(ConfigurationError::MissingConditionLabel {
                        condition,
                        platform,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for ConditionMapper {
    fn default() -> Self {
        use Condition::*;
        let table = |rows: [(Condition, &str); 5]| -> BTreeMap<Condition, String> {
            rows.into_iter().map(|(c, l)| (c, l.to_string())).collect()
        };

        let labels = BTreeMap::from([
            (
                Platform::X,
                table([
                    (New, "New"),
                    (Excellent, "New"),
                    (Good, "Good"),
                    (Fair, "Fair"),
                    (Poor, "Scrap"),
                ]),
            ),
            (
                Platform::Y,
                table([
                    (New, "3 stars (Excellent)"),
                    (Excellent, "3 stars (Excellent)"),
                    (Good, "2 stars (Good)"),
                    (Fair, "1 star (Usable)"),
                    (Poor, "1 star (Usable)"),
                ]),
            ),
            (
                Platform::Z,
                table([
                    (New, "New"),
                    (Excellent, "New"),
                    (Good, "As New"),
                    (Fair, "Good"),
                    (Poor, "Usable"),
                ]),
            ),
        ]);
        Self { labels }
    }
}
