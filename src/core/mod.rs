//! Core betting math

pub mod kelly;
pub mod odds;
pub mod tier;

// Re-export commonly used types
pub use kelly::{calculate_kelly, calculate_kelly_fraction, BetSizing, StakeSizer};
pub use odds::{
    american_to_decimal, calculate_edge, calculate_payout, calculate_roi, decimal_to_american,
    implied_probability,
};
pub use tier::{TierClassifier, TierThresholds};
