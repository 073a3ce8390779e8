//! Layered configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults (`config/default.toml`, compiled in)
//! 2. an optional user file (format picked by extension)
//! 3. `PHONEDASH__*` environment variables, `__` between sections,
//!    e.g. `PHONEDASH__PRICING__MIN_MARGIN=5.00`

use crate::model::{Condition, Platform};
use crate::pricing::{ConditionMapper, ConfigurationError, FeeModel, FeeSchedule, PricingEngine};
use config::{Config, ConfigError, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub storage: StorageSettings,
    pub pricing: PricingSettings,
    /// Keyed by platform name (`x`, `y`, `z`).
    pub platforms: BTreeMap<String, PlatformSettings>,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Where the JSON backend keeps `phones.json` and `logs.json`.
    pub data_dir: PathBuf,
    pub mailbox_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    #[serde(default)]
    pub min_margin: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlatformSettings {
    pub fee_rate: Decimal,
    #[serde(default)]
    pub fee_flat: Decimal,
    /// Condition name to the label the platform uses for it.
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULTS, FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(Environment::with_prefix("PHONEDASH").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Builds the engine, failing on any unknown name or incomplete table.
    pub fn pricing_engine(&self) -> Result<PricingEngine, ConfigurationError> {
        let mut schedules = BTreeMap::new();
        let mut labels = BTreeMap::new();

        for (name, platform_settings) in &self.platforms {
            let platform = Platform::from_str(name)
                .map_err(|e| ConfigurationError::UnknownPlatform(e.0))?;
            schedules.insert(
                platform,
                FeeSchedule::new(platform_settings.fee_rate, platform_settings.fee_flat),
            );

            let mut table = BTreeMap::new();
            for (condition, label) in &platform_settings.conditions {
                let condition = Condition::from_str(condition)
                    .map_err(|e| ConfigurationError::UnknownCondition(e.0))?;
                table.insert(condition, label.clone());
            }
            labels.insert(platform, table);
        }

        PricingEngine::new(
            FeeModel::new(&schedules)?,
            ConditionMapper::new(labels),
            self.pricing.min_margin,
        )
    }
}
