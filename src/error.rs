use thiserror::Error;

/// Betting math errors
///
/// All variants are input-validation failures. Retrying with the same input
/// produces the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BetMathError {
    /// American odds of zero, or decimal odds at or below 1.0
    #[error("Invalid odds: {0}")]
    InvalidOdds(String),

    /// Net odds of zero in a Kelly computation
    #[error("Degenerate odds: net odds must be positive, got {0}")]
    DegenerateOdds(f64),

    /// Tier thresholds not strictly descending A > B > C, or outside [0, 1]
    #[error("Invalid tier thresholds: a={a_min}, b={b_min}, c={c_min}")]
    InvalidThresholds { a_min: f64, b_min: f64, c_min: f64 },

    /// Probability that is NaN or outside [0, 1]
    #[error("Probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),

    /// Kelly multiplier or bankroll fraction that is negative or non-finite
    #[error("Fraction must be a finite non-negative number, got {0}")]
    InvalidFraction(f64),

    /// Minimum edge that is NaN or infinite
    #[error("Minimum edge must be a finite number, got {0}")]
    InvalidEdge(f64),
}

pub type Result<T> = std::result::Result<T, BetMathError>;

/// Validation functions
pub fn validate_american_odds(odds: i32) -> Result<()> {
    if odds == 0 {
        return Err(BetMathError::InvalidOdds(
            "American odds cannot be 0".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_decimal_odds(decimal: f64) -> Result<()> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(BetMathError::InvalidOdds(format!(
            "Decimal odds must be greater than 1.0, got {}",
            decimal
        )));
    }
    Ok(())
}

pub fn validate_probability(prob: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(BetMathError::InvalidProbability(prob));
    }
    Ok(())
}

pub fn validate_fraction(fraction: f64) -> Result<()> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(BetMathError::InvalidFraction(fraction));
    }
    Ok(())
}

pub fn validate_min_edge(min_edge: f64) -> Result<()> {
    if !min_edge.is_finite() {
        return Err(BetMathError::InvalidEdge(min_edge));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_american_odds() {
        assert!(validate_american_odds(-110).is_ok());
        assert!(validate_american_odds(150).is_ok());
        assert!(validate_american_odds(0).is_err());
    }

    #[test]
    fn test_validate_decimal_odds() {
        assert!(validate_decimal_odds(1.01).is_ok());
        assert!(validate_decimal_odds(2.0).is_ok());
        assert!(validate_decimal_odds(1.0).is_err());
        assert!(validate_decimal_odds(0.5).is_err());
        assert!(validate_decimal_odds(f64::NAN).is_err());
        assert!(validate_decimal_odds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_probability_valid() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(0.5).is_ok());
        assert!(validate_probability(1.0).is_ok());
    }

    #[test]
    fn test_validate_probability_invalid() {
        assert!(validate_probability(-0.1).is_err());
        assert!(validate_probability(1.1).is_err());
        assert!(validate_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_fraction() {
        assert!(validate_fraction(0.0).is_ok());
        assert!(validate_fraction(0.25).is_ok());
        assert!(validate_fraction(-0.25).is_err());
        assert!(validate_fraction(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_min_edge() {
        assert!(validate_min_edge(0.03).is_ok());
        assert!(validate_min_edge(-0.02).is_ok());
        assert_eq!(
            validate_min_edge(f64::NEG_INFINITY),
            Err(BetMathError::InvalidEdge(f64::NEG_INFINITY))
        );
        assert!(validate_min_edge(f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = BetMathError::InvalidProbability(1.5);
        assert!(err.to_string().contains("between 0 and 1"));

        let err = BetMathError::InvalidThresholds {
            a_min: 0.5,
            b_min: 0.6,
            c_min: 0.55,
        };
        assert!(err.to_string().contains("a=0.5"));
    }
}
