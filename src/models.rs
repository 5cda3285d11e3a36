use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::core::odds::{calculate_edge, calculate_payout};
use crate::core::tier::TierClassifier;
use crate::error::{validate_american_odds, Result};

/// Signal confidence tier, A highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalTier {
    A,
    B,
    C,
    D,
}

impl SignalTier {
    fn rank(self) -> u8 {
        match self {
            SignalTier::A => 3,
            SignalTier::B => 2,
            SignalTier::C => 1,
            SignalTier::D => 0,
        }
    }
}

impl Ord for SignalTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for SignalTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SignalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalTier::A => "A",
            SignalTier::B => "B",
            SignalTier::C => "C",
            SignalTier::D => "D",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a bet or prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetResult {
    #[serde(alias = "won")]
    Win,
    #[serde(alias = "lost")]
    Loss,
    Push,
    #[serde(alias = "open")]
    Pending,
}

impl BetResult {
    pub fn is_settled(self) -> bool {
        !matches!(self, BetResult::Pending)
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BetResult::Win => "win",
            BetResult::Loss => "loss",
            BetResult::Push => "push",
            BetResult::Pending => "pending",
        };
        write!(f, "{}", label)
    }
}

/// Supported sports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    Nfl,
    Ncaaf,
    Cfl,
    Nba,
    Ncaab,
    Wnba,
    Nhl,
    Mlb,
    Atp,
    Wta,
}

impl Sport {
    pub fn display_name(self) -> &'static str {
        match self {
            Sport::Nfl => "NFL Football",
            Sport::Ncaaf => "College Football",
            Sport::Cfl => "CFL Football",
            Sport::Nba => "NBA Basketball",
            Sport::Ncaab => "College Basketball",
            Sport::Wnba => "WNBA Basketball",
            Sport::Nhl => "NHL Hockey",
            Sport::Mlb => "MLB Baseball",
            Sport::Atp => "ATP Tennis",
            Sport::Wta => "WTA Tennis",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Sport::Nfl => "NFL",
            Sport::Ncaaf => "NCAAF",
            Sport::Cfl => "CFL",
            Sport::Nba => "NBA",
            Sport::Ncaab => "NCAAB",
            Sport::Wnba => "WNBA",
            Sport::Nhl => "NHL",
            Sport::Mlb => "MLB",
            Sport::Atp => "ATP",
            Sport::Wta => "WTA",
        };
        write!(f, "{}", code)
    }
}

/// Market type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Spread,
    Moneyline,
    Total,
}

impl BetType {
    pub fn display_name(self) -> &'static str {
        match self {
            BetType::Spread => "Spread",
            BetType::Moneyline => "Moneyline",
            BetType::Total => "Total",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            BetType::Spread => "spread",
            BetType::Moneyline => "moneyline",
            BetType::Total => "total",
        };
        write!(f, "{}", code)
    }
}

/// Placed bet, as returned by the bet history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    pub stake: f64,
    pub odds: i32,
    #[serde(alias = "status")]
    pub result: BetResult,
    #[serde(default, alias = "profit_loss", skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_tier: Option<SignalTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<Sport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_type: Option<BetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_at: Option<DateTime<Utc>>,
}

impl BetRecord {
    pub fn new(stake: f64, odds: i32, result: BetResult) -> Result<Self> {
        validate_american_odds(odds)?;

        Ok(Self {
            stake,
            odds,
            result,
            profit: None,
            clv: None,
            signal_tier: None,
            sport: None,
            bet_type: None,
            placed_at: None,
        })
    }

    /// Profit of a settled bet
    ///
    /// Uses the recorded profit when present, otherwise derives it from the
    /// odds. `None` while pending, even if a profit was recorded.
    pub fn settled_profit(&self) -> Result<Option<f64>> {
        if !self.result.is_settled() {
            return Ok(None);
        }
        if let Some(profit) = self.profit {
            return Ok(Some(profit));
        }

        let profit = match self.result {
            BetResult::Win => calculate_payout(self.stake, self.odds)? - self.stake,
            BetResult::Loss => -self.stake,
            BetResult::Push | BetResult::Pending => 0.0,
        };
        Ok(Some(profit))
    }
}

/// Model prediction
///
/// Edge and tier are fixed when the prediction is made and never recomputed,
/// so later threshold changes leave stored tiers alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub sport: Sport,
    pub bet_type: BetType,
    pub predicted_side: String,
    pub probability: f64,
    pub odds_at_prediction: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_at_prediction: Option<f64>,
    pub edge: f64,
    pub signal_tier: SignalTier,
    #[serde(default = "default_status")]
    pub status: BetResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> BetResult {
    BetResult::Pending
}

impl Prediction {
    pub fn new(
        sport: Sport,
        bet_type: BetType,
        predicted_side: impl Into<String>,
        probability: f64,
        odds: i32,
        classifier: &TierClassifier,
    ) -> Result<Self> {
        let edge = calculate_edge(probability, odds)?;

        Ok(Self {
            sport,
            bet_type,
            predicted_side: predicted_side.into(),
            probability,
            odds_at_prediction: odds,
            line_at_prediction: None,
            edge,
            signal_tier: classifier.classify(probability),
            status: BetResult::Pending,
            created_at: Some(Utc::now()),
        })
    }
}
