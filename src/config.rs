//! Betting configuration
//!
//! Loaded from a JSON file, then overridden from `SPORTSEDGE_*` environment
//! variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::core::tier::{TierClassifier, TierThresholds};
use crate::error::{validate_fraction, BetMathError};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Invalid(#[from] BetMathError),
}

/// User betting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BettingConfig {
    /// Fractional Kelly multiplier (0.25 = quarter Kelly)
    pub kelly_fraction: f64,
    /// Maximum single bet as fraction of bankroll
    pub max_bet_percent: f64,
    /// Minimum edge before any stake is recommended
    pub min_edge: f64,
    pub tier_thresholds: TierThresholds,
}

impl Default for BettingConfig {
    fn default() -> Self {
        Self {
            kelly_fraction: 0.25,
            max_bet_percent: 0.02,
            min_edge: 0.03,
            tier_thresholds: TierThresholds::DASHBOARD_DEFAULT,
        }
    }
}

const ENV_KELLY_FRACTION: &str = "SPORTSEDGE_KELLY_FRACTION";
const ENV_MAX_BET_PERCENT: &str = "SPORTSEDGE_MAX_BET_PERCENT";
const ENV_MIN_EDGE: &str = "SPORTSEDGE_MIN_EDGE";
const ENV_TIER_A: &str = "SPORTSEDGE_TIER_A";
const ENV_TIER_B: &str = "SPORTSEDGE_TIER_B";
const ENV_TIER_C: &str = "SPORTSEDGE_TIER_C";

impl BettingConfig {
    /// Load configuration from a JSON file; missing fields use defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        info!("Loaded betting config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SPORTSEDGE_*` environment overrides
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| -> Result<Option<f64>, ConfigError> {
            match lookup(key) {
                Some(raw) => {
                    let value = raw.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: raw.clone(),
                    })?;
                    info!("Config override {}={}", key, value);
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        };

        if let Some(v) = read(ENV_KELLY_FRACTION)? {
            self.kelly_fraction = v;
        }
        if let Some(v) = read(ENV_MAX_BET_PERCENT)? {
            self.max_bet_percent = v;
        }
        if let Some(v) = read(ENV_MIN_EDGE)? {
            self.min_edge = v;
        }

        // Thresholds are rebuilt as a whole so the ordering check sees the final table
        let t = self.tier_thresholds;
        let a_min = read(ENV_TIER_A)?.unwrap_or(t.a_min());
        let b_min = read(ENV_TIER_B)?.unwrap_or(t.b_min());
        let c_min = read(ENV_TIER_C)?.unwrap_or(t.c_min());
        self.tier_thresholds = TierThresholds::new(a_min, b_min, c_min)?;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fraction(self.kelly_fraction)?;
        validate_fraction(self.max_bet_percent)?;
        if !self.min_edge.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "min_edge".to_string(),
                value: self.min_edge.to_string(),
            });
        }
        Ok(())
    }

    pub fn classifier(&self) -> TierClassifier {
        TierClassifier::new(self.tier_thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignalTier;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BettingConfig::default();
        assert_eq!(config.kelly_fraction, 0.25);
        assert_eq!(config.max_bet_percent, 0.02);
        assert_eq!(config.min_edge, 0.03);
        assert_eq!(config.tier_thresholds.a_min(), 0.65);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = BettingConfig::from_json(r#"{"kelly_fraction": 0.5}"#).unwrap();
        assert_eq!(config.kelly_fraction, 0.5);
        assert_eq!(config.max_bet_percent, 0.02);
        assert_eq!(config.tier_thresholds.c_min(), 0.55);
    }

    #[test]
    fn test_from_json_thresholds() {
        let json = r#"{"tier_thresholds": {"a": 0.70, "b": 0.62, "c": 0.52}}"#;
        let config = BettingConfig::from_json(json).unwrap();
        assert_eq!(config.classifier().classify(0.65), SignalTier::B);
    }

    #[test]
    fn test_from_json_rejects_misordered_thresholds() {
        let json = r#"{"tier_thresholds": {"a": 0.55, "b": 0.60, "c": 0.65}}"#;
        assert!(matches!(
            BettingConfig::from_json(json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_negative_kelly() {
        assert!(matches!(
            BettingConfig::from_json(r#"{"kelly_fraction": -0.5}"#),
            Err(ConfigError::Invalid(BetMathError::InvalidFraction(_)))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            BettingConfig::from_file("/nonexistent/sportsedge.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = BettingConfig::default()
            .apply_overrides(lookup(&[
                (ENV_KELLY_FRACTION, "0.5"),
                (ENV_TIER_A, " 0.70 "),
            ]))
            .unwrap();

        assert_eq!(config.kelly_fraction, 0.5);
        assert_eq!(config.tier_thresholds.a_min(), 0.70);
        assert_eq!(config.tier_thresholds.b_min(), 0.60);
    }

    #[test]
    fn test_overrides_checked_as_whole_table() {
        // Raising B above the default A is only valid together with a new A
        let config = BettingConfig::default()
            .apply_overrides(lookup(&[(ENV_TIER_A, "0.75"), (ENV_TIER_B, "0.68")]))
            .unwrap();
        assert_eq!(config.tier_thresholds.b_min(), 0.68);

        let err = BettingConfig::default()
            .apply_overrides(lookup(&[(ENV_TIER_B, "0.68")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(BetMathError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_overrides_bad_number() {
        let err = BettingConfig::default()
            .apply_overrides(lookup(&[(ENV_MIN_EDGE, "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_MIN_EDGE));
    }
}
