// Ledger Configuration
//
// Where the two stores live and how bookings are priced. Loaded from
// JSON; any field left out keeps its built-in value.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::guests::DuplicatePolicy;
use crate::pricing::{BookingCalculator, DEFAULT_NIGHTLY_RATE};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("nightly rate must not be negative, got {0}")]
    NegativeRate(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub guest_file: PathBuf,
    pub booking_file: PathBuf,
    pub nightly_rate: Decimal,
    pub allow_duplicate_keys: bool,
}

impl LedgerConfig {
    /// Built-in configuration (used if no config is provided).
    pub fn default_config() -> Self {
        Self {
            guest_file: PathBuf::from("guests.txt"),
            booking_file: PathBuf::from("bookings.txt"),
            nightly_rate: DEFAULT_NIGHTLY_RATE,
            allow_duplicate_keys: true,
        }
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        if config.nightly_rate.is_sign_negative() && !config.nightly_rate.is_zero() {
            return Err(ConfigError::NegativeRate(config.nightly_rate));
        }
        Ok(config)
    }

    /// Resolve relative store paths against `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        if self.guest_file.is_relative() {
            self.guest_file = base.join(&self.guest_file);
        }
        if self.booking_file.is_relative() {
            self.booking_file = base.join(&self.booking_file);
        }
        self
    }

    pub fn calculator(&self) -> BookingCalculator {
        BookingCalculator::new(self.nightly_rate)
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy {
            allow_duplicate_keys: self.allow_duplicate_keys,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
