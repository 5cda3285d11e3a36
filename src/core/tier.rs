//! Signal Tier Classification
//!
//! Maps a model win probability to a confidence tier using a threshold table.
//! Lower bounds are inclusive: a probability exactly at a threshold gets the
//! higher tier.

use serde::{Deserialize, Serialize};

use crate::error::{BetMathError, Result};
use crate::models::SignalTier;

/// Minimum probabilities for tiers A, B and C
///
/// Always satisfies `1 >= a_min > b_min > c_min >= 0`; deserialization goes
/// through the same check as [`TierThresholds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct TierThresholds {
    a_min: f64,
    b_min: f64,
    c_min: f64,
}

#[derive(Deserialize)]
struct RawThresholds {
    #[serde(alias = "a")]
    a_min: f64,
    #[serde(alias = "b")]
    b_min: f64,
    #[serde(alias = "c")]
    c_min: f64,
}

impl TryFrom<RawThresholds> for TierThresholds {
    type Error = BetMathError;

    fn try_from(raw: RawThresholds) -> Result<Self> {
        Self::new(raw.a_min, raw.b_min, raw.c_min)
    }
}

impl TierThresholds {
    /// Table used by the dashboard settings page (65% / 60% / 55%)
    pub(crate) const DASHBOARD_DEFAULT: TierThresholds = TierThresholds {
        a_min: 0.65,
        b_min: 0.60,
        c_min: 0.55,
    };

    pub fn new(a_min: f64, b_min: f64, c_min: f64) -> Result<Self> {
        let in_range = [a_min, b_min, c_min]
            .iter()
            .all(|t| (0.0..=1.0).contains(t));

        if !in_range || a_min <= b_min || b_min <= c_min {
            return Err(BetMathError::InvalidThresholds {
                a_min,
                b_min,
                c_min,
            });
        }

        Ok(Self {
            a_min,
            b_min,
            c_min,
        })
    }

    pub fn a_min(&self) -> f64 {
        self.a_min
    }

    pub fn b_min(&self) -> f64 {
        self.b_min
    }

    pub fn c_min(&self) -> f64 {
        self.c_min
    }

    /// Lower bound for a tier (D has none and returns 0.0)
    pub fn min_for(&self, tier: SignalTier) -> f64 {
        match tier {
            SignalTier::A => self.a_min,
            SignalTier::B => self.b_min,
            SignalTier::C => self.c_min,
            SignalTier::D => 0.0,
        }
    }
}

/// Probability to tier classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierClassifier {
    thresholds: TierThresholds,
}

impl TierClassifier {
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Classify a win probability
    ///
    /// NaN falls through to the floor tier D.
    ///
    /// # Examples
    /// ```
    /// use sportsedge::core::tier::{TierClassifier, TierThresholds};
    /// use sportsedge::SignalTier;
    ///
    /// let thresholds = TierThresholds::new(0.65, 0.60, 0.55).unwrap();
    /// let classifier = TierClassifier::new(thresholds);
    /// assert_eq!(classifier.classify(0.60), SignalTier::B);
    /// assert_eq!(classifier.classify(0.549), SignalTier::D);
    /// ```
    pub fn classify(&self, probability: f64) -> SignalTier {
        let t = &self.thresholds;
        if probability >= t.a_min {
            SignalTier::A
        } else if probability >= t.b_min {
            SignalTier::B
        } else if probability >= t.c_min {
            SignalTier::C
        } else {
            SignalTier::D
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TierClassifier {
        TierClassifier::new(TierThresholds::new(0.65, 0.60, 0.55).unwrap())
    }

    #[test]
    fn test_classify_boundaries_inclusive() {
        let c = classifier();
        assert_eq!(c.classify(0.65), SignalTier::A);
        assert_eq!(c.classify(0.60), SignalTier::B);
        assert_eq!(c.classify(0.55), SignalTier::C);
    }

    #[test]
    fn test_classify_just_below_boundaries() {
        let c = classifier();
        let eps = 1e-9;
        assert_eq!(c.classify(0.65 - eps), SignalTier::B);
        assert_eq!(c.classify(0.60 - eps), SignalTier::C);
        assert_eq!(c.classify(0.549), SignalTier::D);
    }

    #[test]
    fn test_classify_extremes() {
        let c = classifier();
        assert_eq!(c.classify(0.0), SignalTier::D);
        assert_eq!(c.classify(1.0), SignalTier::A);
        assert_eq!(c.classify(f64::NAN), SignalTier::D);
    }

    #[test]
    fn test_classify_monotonic() {
        let c = classifier();
        let mut previous = SignalTier::D;
        for i in 0..=100 {
            let tier = c.classify(i as f64 / 100.0);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let c = TierClassifier::new(TierThresholds::new(0.70, 0.62, 0.52).unwrap());
        assert_eq!(c.classify(0.65), SignalTier::B);
        assert_eq!(c.classify(0.52), SignalTier::C);
    }

    #[test]
    fn test_invalid_thresholds() {
        // Misordered
        assert!(matches!(
            TierThresholds::new(0.60, 0.65, 0.55),
            Err(BetMathError::InvalidThresholds { .. })
        ));
        // Equal boundaries
        assert!(TierThresholds::new(0.65, 0.65, 0.55).is_err());
        assert!(TierThresholds::new(0.65, 0.60, 0.60).is_err());
        // Out of range
        assert!(TierThresholds::new(1.2, 0.60, 0.55).is_err());
        assert!(TierThresholds::new(0.65, 0.60, -0.1).is_err());
        assert!(TierThresholds::new(f64::NAN, 0.60, 0.55).is_err());
    }

    #[test]
    fn test_dashboard_default_is_valid() {
        let d = TierThresholds::DASHBOARD_DEFAULT;
        assert_eq!(TierThresholds::new(d.a_min, d.b_min, d.c_min).unwrap(), d);
    }

    #[test]
    fn test_min_for() {
        let t = TierThresholds::new(0.65, 0.60, 0.55).unwrap();
        assert_eq!(t.min_for(SignalTier::A), 0.65);
        assert_eq!(t.min_for(SignalTier::C), 0.55);
        assert_eq!(t.min_for(SignalTier::D), 0.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let t: TierThresholds =
            serde_json::from_str(r#"{"a": 0.7, "b": 0.6, "c": 0.5}"#).unwrap();
        assert_eq!(t.a_min(), 0.7);

        let t: TierThresholds =
            serde_json::from_str(r#"{"a_min": 0.7, "b_min": 0.6, "c_min": 0.5}"#).unwrap();
        assert_eq!(t.c_min(), 0.5);

        let bad = serde_json::from_str::<TierThresholds>(r#"{"a": 0.5, "b": 0.6, "c": 0.55}"#);
        assert!(bad.is_err());
    }
}
