//! SportsEdge - Betting math for the sports analytics dashboard
//!
//! This library provides:
//! - American/decimal odds conversion and implied probability
//! - Edge, payout and ROI calculation
//! - Fractional Kelly bet sizing with bankroll caps
//! - Signal tier (A-D) classification from configurable thresholds
//! - Grouping, sorting and summary statistics over bet history
//!
//! # Example
//!
//! ```
//! use sportsedge::config::BettingConfig;
//! use sportsedge::core::kelly::StakeSizer;
//! use sportsedge::SignalTier;
//!
//! let config = BettingConfig::default();
//! let classifier = config.classifier();
//! assert_eq!(classifier.classify(0.58), SignalTier::C);
//!
//! let sizer = StakeSizer::from_config(10_000.0, &config).unwrap();
//! let sizing = sizer.size(0.58, -110).unwrap();
//! println!("Recommended stake: {}", sizing.recommended_stake);
//! ```

pub mod analytics;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod models;

// Re-export commonly used types
pub use analytics::{BetSummary, DimensionPerformance, SortOrder};
pub use config::{BettingConfig, ConfigError};
pub use error::BetMathError;
pub use models::{BetRecord, BetResult, BetType, Prediction, SignalTier, Sport};
