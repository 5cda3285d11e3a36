//! Odds Conversion
//!
//! Conversions between American odds, decimal odds and implied probability,
//! plus edge, payout and ROI.
//!
//! American odds:
//!     +150 = stake 100 to win 150
//!     -110 = stake 110 to win 100
//!
//! Decimal odds include the stake: 2.50 returns 2.50 per 1.00 staked.

use crate::error::{
    validate_american_odds, validate_decimal_odds, validate_probability, BetMathError, Result,
};

/// Convert American odds to decimal odds
///
/// # Examples
/// ```
/// use sportsedge::core::odds::american_to_decimal;
/// let decimal = american_to_decimal(-110).unwrap();
/// assert!((decimal - 1.9091).abs() < 0.0001);
/// assert_eq!(american_to_decimal(150).unwrap(), 2.5);
/// assert!(american_to_decimal(0).is_err());
/// ```
pub fn american_to_decimal(odds: i32) -> Result<f64> {
    validate_american_odds(odds)?;

    let odds = f64::from(odds);
    if odds > 0.0 {
        Ok(odds / 100.0 + 1.0)
    } else {
        Ok(100.0 / odds.abs() + 1.0)
    }
}

/// Convert decimal odds to American odds, rounded to the nearest integer
///
/// Decimal 2.0 maps to +100 (even money is quoted as a positive price).
pub fn decimal_to_american(decimal: f64) -> Result<i32> {
    validate_decimal_odds(decimal)?;

    let american = if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round()
    } else {
        (-100.0 / (decimal - 1.0)).round()
    };

    // Decimal odds a hair above 1.0 produce prices beyond i32
    if american < f64::from(i32::MIN) || american > f64::from(i32::MAX) {
        return Err(BetMathError::InvalidOdds(format!(
            "Decimal odds {} are outside the American odds range",
            decimal
        )));
    }

    Ok(american as i32)
}

/// Implied win probability of an American price, ignoring bookmaker margin
///
/// Always strictly between 0 and 1.
pub fn implied_probability(odds: i32) -> Result<f64> {
    validate_american_odds(odds)?;

    let odds = f64::from(odds);
    if odds > 0.0 {
        Ok(100.0 / (odds + 100.0))
    } else {
        let risk = odds.abs();
        Ok(risk / (risk + 100.0))
    }
}

/// Edge of a model probability over the market price
///
/// `probability - implied_probability(odds)`, unclamped. Negative edge means a
/// negative-expectation bet.
pub fn calculate_edge(probability: f64, odds: i32) -> Result<f64> {
    validate_probability(probability)?;
    Ok(probability - implied_probability(odds)?)
}

/// Total return of a winning bet, stake included
pub fn calculate_payout(stake: f64, odds: i32) -> Result<f64> {
    Ok(stake * american_to_decimal(odds)?)
}

/// Return on investment
///
/// Returns 0.0 when nothing was wagered.
pub fn calculate_roi(profit: f64, wagered: f64) -> f64 {
    if wagered == 0.0 {
        0.0
    } else {
        profit / wagered
    }
}
