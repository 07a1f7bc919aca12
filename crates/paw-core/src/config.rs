//! Engine configuration and the documented request bounds.
//!
//! The request bounds (pet cardinality, window day ranges) are business
//! constants: callers rely on them and tests pin them, so they are consts
//! rather than configuration. The only tunable is the default window length
//! applied when a caller omits `days`.

use paw_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum pets per comparison.
pub const MIN_COMPARE_PETS: usize = 2;

/// Maximum pets per full comparison.
pub const MAX_COMPARE_PETS: usize = 5;

/// Minimum window for a full comparison, in days.
pub const MIN_COMPARE_DAYS: u32 = 1;

/// Minimum window for a trend comparison, in days.
pub const MIN_TREND_DAYS: u32 = 7;

/// Maximum window for either operation, in days.
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Default window applied when a caller omits `days`.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EngineConfig {
    /// Window length used when a request omits `days`.
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl EngineConfig {
    /// Validate internal consistency.
    ///
    /// The default window must satisfy the stricter trend minimum so that a
    /// defaulted request is valid for both operations.
    pub fn validate(&self) -> Result<()> {
        if self.default_window_days < MIN_TREND_DAYS || self.default_window_days > MAX_WINDOW_DAYS
        {
            return Err(Error::InvalidConfig(format!(
                "default_window_days {} outside [{}, {}]",
                self.default_window_days, MIN_TREND_DAYS, MAX_WINDOW_DAYS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.default_window_days, 30);
        config.validate().expect("defaults must validate");
    }

    #[test]
    fn test_validate_rejects_out_of_range_default() {
        let config = EngineConfig {
            default_window_days: 0,
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            default_window_days: 400,
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            default_window_days: 3,
        };
        assert!(config.validate().is_err(), "below the trend minimum");
    }

    #[test]
    fn test_serde_defaults_apply() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_serde_rejects_unknown_fields() {
        let parsed: std::result::Result<EngineConfig, _> =
            serde_json::from_str(r#"{"defualt_window_days": 30}"#);
        assert!(parsed.is_err());
    }
}
