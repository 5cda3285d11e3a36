//! Kelly Criterion Bet Sizing
//!
//! Optimal bet sizing based on edge and odds using Kelly criterion.
//!
//! The Kelly criterion formula:
//!     f* = (b*p - q) / b
//!
//! Where:
//!     f* = fraction of bankroll to bet
//!     b = decimal odds - 1 (net odds)
//!     p = probability of winning
//!     q = 1 - p (probability of losing)
//!
//! The fractional Kelly multiplier is always supplied by the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::odds::{american_to_decimal, calculate_edge};
use crate::config::BettingConfig;
use crate::error::{
    validate_fraction, validate_min_edge, validate_probability, BetMathError, Result,
};

/// Bet sizing recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSizing {
    pub probability: f64,
    pub odds: i32,
    pub edge: f64,
    pub kelly_fraction: f64,       // Full Kelly, may be negative
    pub recommended_fraction: f64, // After multiplier and bet cap
    pub recommended_stake: f64,
    pub max_bet_capped: bool,
}

/// Calculate the full Kelly fraction for a single bet
///
/// # Returns
/// Kelly fraction (negative when the bet has negative expectation)
///
/// # Examples
/// ```
/// use sportsedge::core::kelly::calculate_kelly_fraction;
/// // +100 is even money: f* = 2p - 1
/// let kelly = calculate_kelly_fraction(0.60, 100).unwrap();
/// assert!((kelly - 0.20).abs() < 1e-9);
/// ```
pub fn calculate_kelly_fraction(probability: f64, odds: i32) -> Result<f64> {
    validate_probability(probability)?;

    let b = american_to_decimal(odds)? - 1.0;
    if b <= 0.0 {
        return Err(BetMathError::DegenerateOdds(b));
    }

    let q = 1.0 - probability;
    Ok((b * probability - q) / b)
}

/// Calculate the recommended bankroll fraction with fractional Kelly
///
/// `max(0, f* × fraction)`. Never negative: no short bets.
///
/// # Arguments
/// * `probability` - Estimated probability of winning (0-1)
/// * `odds` - American odds
/// * `fraction` - Kelly multiplier (0.25 = quarter Kelly)
///
/// # Examples
/// ```
/// use sportsedge::core::kelly::calculate_kelly;
/// let stake = calculate_kelly(0.58, -110, 0.25).unwrap();
/// assert!((stake - 0.0295).abs() < 0.0001);
/// ```
pub fn calculate_kelly(probability: f64, odds: i32, fraction: f64) -> Result<f64> {
    validate_fraction(fraction)?;
    let kelly = calculate_kelly_fraction(probability, odds)?;
    Ok((kelly * fraction).max(0.0))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Stake sizer for a bankroll
///
/// Applies, in order:
/// - minimum edge filter
/// - fractional Kelly
/// - maximum single bet as % of bankroll
#[derive(Debug, Clone)]
pub struct StakeSizer {
    pub bankroll: f64,
    pub kelly_fraction: f64,
    pub max_bet_percent: f64,
    pub min_edge: f64,
}

impl StakeSizer {
    /// Create a new stake sizer
    ///
    /// # Arguments
    /// * `bankroll` - Current bankroll
    /// * `kelly_fraction` - Fraction of Kelly to use (0.25 = quarter Kelly)
    /// * `max_bet_percent` - Maximum single bet as fraction of bankroll
    /// * `min_edge` - Minimum edge required to recommend any stake
    pub fn new(
        bankroll: f64,
        kelly_fraction: f64,
        max_bet_percent: f64,
        min_edge: f64,
    ) -> Result<Self> {
        validate_fraction(kelly_fraction)?;
        validate_fraction(max_bet_percent)?;
        validate_min_edge(min_edge)?;

        Ok(Self {
            bankroll,
            kelly_fraction,
            max_bet_percent,
            min_edge,
        })
    }

    /// Create from betting configuration
    pub fn from_config(bankroll: f64, config: &BettingConfig) -> Result<Self> {
        Self::new(
            bankroll,
            config.kelly_fraction,
            config.max_bet_percent,
            config.min_edge,
        )
    }

    /// Calculate bet sizing for a single bet
    pub fn size(&self, probability: f64, odds: i32) -> Result<BetSizing> {
        let edge = calculate_edge(probability, odds)?;
        let kelly = calculate_kelly_fraction(probability, odds)?;
        let fractional = calculate_kelly(probability, odds, self.kelly_fraction)?;

        if edge < self.min_edge {
            debug!(
                "Edge {:.4} below minimum {:.4}, no stake for {} at {}",
                edge, self.min_edge, probability, odds
            );
            return Ok(BetSizing {
                probability,
                odds,
                edge,
                kelly_fraction: kelly,
                recommended_fraction: 0.0,
                recommended_stake: 0.0,
                max_bet_capped: false,
            });
        }

        let max_bet_capped = fractional > self.max_bet_percent;
        let recommended_fraction = fractional.min(self.max_bet_percent);
        if max_bet_capped {
            debug!(
                "Kelly fraction {:.4} capped at {:.4}",
                fractional, self.max_bet_percent
            );
        }

        let recommended_stake = round_cents(self.bankroll * recommended_fraction).max(0.0);

        Ok(BetSizing {
            probability,
            odds,
            edge,
            kelly_fraction: kelly,
            recommended_fraction,
            recommended_stake,
            max_bet_capped,
        })
    }

    /// Calculate bet sizing for multiple independent bets
    ///
    /// Fails on the first invalid (probability, odds) pair.
    pub fn size_many(&self, bets: &[(f64, i32)]) -> Result<Vec<BetSizing>> {
        bets.iter().map(|&(p, o)| self.size(p, o)).collect()
    }

    /// Update bankroll after bet result
    pub fn update_bankroll(&mut self, profit: f64) {
        self.bankroll += profit;
    }
}
