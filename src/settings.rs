//! Register configuration.
//!
//! A plain serializable settings struct the embedding host supplies at
//! startup (or loads from wherever it keeps config). Defaults reproduce
//! the observed counter behavior: 20% Rx discount, 15% tax after
//! discount, operator discounts capped at 100%, English labels, and the
//! stock scanner timing heuristics.

use crate::i18n::Lang;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_STORE_NAME: &str = "Pharmacy";

/// Gap between scanner keystrokes is under this; human typing is over it.
pub const DEFAULT_SCAN_IDLE_MS: i64 = 40;

/// Scanned codes shorter than this are treated as stray typing.
pub const DEFAULT_SCAN_MIN_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Host-supplied register configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterSettings {
    pub store_name: String,
    pub currency_symbol: String,
    /// Rx-counter discount as a fraction of the subtotal (0.20 = 20%).
    pub discount_rate: Decimal,
    /// Tax as a fraction of the discounted base (0.15 = 15%).
    pub tax_rate: Decimal,
    /// Upper bound for operator-entered cash discounts, in percent.
    pub discount_max: Decimal,
    pub language: Lang,
    pub scan_idle_ms: i64,
    pub scan_min_length: usize,
}

impl Default for RegisterSettings {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            currency_symbol: "$".to_string(),
            discount_rate: Decimal::new(20, 2),
            tax_rate: Decimal::new(15, 2),
            discount_max: Decimal::ONE_HUNDRED,
            language: Lang::En,
            scan_idle_ms: DEFAULT_SCAN_IDLE_MS,
            scan_min_length: DEFAULT_SCAN_MIN_LENGTH,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("discount rate {0} outside 0..=1")]
    DiscountRate(Decimal),
    #[error("tax rate {0} outside 0..=1")]
    TaxRate(Decimal),
    #[error("discount max {0} outside 0..=100")]
    DiscountMax(Decimal),
    #[error("scan idle window must be at least 1 ms")]
    ScanIdleWindow,
    #[error("minimum scan length must be at least 1")]
    ScanMinLength,
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

impl RegisterSettings {
    /// Parse settings from JSON, filling omitted fields from defaults,
    /// then validate.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Range-check every tunable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.discount_rate < Decimal::ZERO || self.discount_rate > Decimal::ONE {
            return Err(SettingsError::DiscountRate(self.discount_rate));
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            return Err(SettingsError::TaxRate(self.tax_rate));
        }
        if self.discount_max < Decimal::ZERO || self.discount_max > Decimal::ONE_HUNDRED {
            return Err(SettingsError::DiscountMax(self.discount_max));
        }
        if self.scan_idle_ms < 1 {
            return Err(SettingsError::ScanIdleWindow);
        }
        if self.scan_min_length < 1 {
            return Err(SettingsError::ScanMinLength);
        }
        Ok(())
    }
}
