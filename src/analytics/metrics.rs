//! Bet Summary Metrics
//!
//! Calculate metrics such as win rate, ROI, CLV and drawdown from bet history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{avg_by, group_by, sum_by};
use crate::core::odds::calculate_roi;
use crate::error::Result;
use crate::models::{BetRecord, BetResult};

/// Bet history summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSummary {
    // Counts
    pub total_bets: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub pending: usize,

    // Returns
    pub win_rate: f64,
    pub total_wagered: f64,
    pub net_profit: f64,
    pub roi: f64,

    // Closing line value
    pub avg_clv: f64,
    pub positive_clv_rate: f64,

    // Risk
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
}

impl Default for BetSummary {
    fn default() -> Self {
        Self {
            total_bets: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            pending: 0,
            win_rate: 0.0,
            total_wagered: 0.0,
            net_profit: 0.0,
            roi: 0.0,
            avg_clv: 0.0,
            positive_clv_rate: 0.0,
            gross_profit: 0.0,
            gross_loss: 0.0,
            profit_factor: 0.0,
            max_drawdown: 0.0,
        }
    }
}

/// Performance for one value of a dimension (tier, sport, bet type, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionPerformance {
    pub key: String,
    pub bets: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub win_rate: f64,
    pub wagered: f64,
    pub profit: f64,
    pub roi: f64,
    pub avg_clv: f64,
}

/// Settled bet with its resolved profit
struct Settled<'a> {
    bet: &'a BetRecord,
    profit: f64,
}

fn settle(records: &[BetRecord]) -> Result<Vec<Settled<'_>>> {
    let mut settled = Vec::with_capacity(records.len());
    for bet in records {
        if let Some(profit) = bet.settled_profit()? {
            settled.push(Settled { bet, profit });
        }
    }
    Ok(settled)
}

fn count(records: &[BetRecord], result: BetResult) -> usize {
    records.iter().filter(|b| b.result == result).count()
}

/// Wins over settled bets; a push counts as a non-win, pending bets are excluded
fn win_rate(wins: usize, losses: usize, pushes: usize) -> f64 {
    let settled = wins + losses + pushes;
    if settled == 0 {
        0.0
    } else {
        wins as f64 / settled as f64
    }
}

/// CLV values of the records that carry one
fn tracked_clv<'a, I>(records: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a BetRecord>,
{
    records.into_iter().filter_map(|b| b.clv).collect()
}

/// Largest peak-to-trough fall of cumulative profit, in record order
fn max_drawdown(profits: &[f64]) -> f64 {
    let mut cumulative = 0.0;
    let mut peak = 0.0;
    let mut max_drawdown: f64 = 0.0;

    for &p in profits {
        cumulative += p;
        if cumulative > peak {
            peak = cumulative;
        }
        max_drawdown = max_drawdown.max(peak - cumulative);
    }

    max_drawdown
}

/// Calculate summary metrics from bet records
///
/// Fails only when a settled bet without a recorded profit has invalid odds.
pub fn summarize(records: &[BetRecord]) -> Result<BetSummary> {
    if records.is_empty() {
        return Ok(BetSummary::default());
    }

    let settled = settle(records)?;

    let wins = count(records, BetResult::Win);
    let losses = count(records, BetResult::Loss);
    let pushes = count(records, BetResult::Push);
    let pending = count(records, BetResult::Pending);

    let total_wagered = sum_by(&settled, |s| s.bet.stake);
    let net_profit = sum_by(&settled, |s| s.profit);

    let gross_profit = sum_by(&settled, |s| s.profit.max(0.0));
    let gross_loss = sum_by(&settled, |s| (-s.profit).max(0.0));

    // Profit Factor
    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let clvs = tracked_clv(records);
    let positive_clv_rate = if clvs.is_empty() {
        0.0
    } else {
        clvs.iter().filter(|&&c| c > 0.0).count() as f64 / clvs.len() as f64
    };

    let profits: Vec<f64> = settled.iter().map(|s| s.profit).collect();

    Ok(BetSummary {
        total_bets: records.len(),
        wins,
        losses,
        pushes,
        pending,
        win_rate: win_rate(wins, losses, pushes),
        total_wagered,
        net_profit,
        roi: calculate_roi(net_profit, total_wagered),
        avg_clv: avg_by(&clvs, |c| *c),
        positive_clv_rate,
        gross_profit,
        gross_loss,
        profit_factor,
        max_drawdown: max_drawdown(&profits),
    })
}

/// Analyze bet results along a dimension
///
/// Records whose key is `None` are grouped under "unknown". Results are
/// sorted by key.
pub fn performance_by<K, F>(records: &[BetRecord], key: F) -> Result<Vec<DimensionPerformance>>
where
    K: ToString,
    F: Fn(&BetRecord) -> Option<K>,
{
    let grouped = group_by(records, |b| {
        key(b)
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    });

    let mut results = Vec::with_capacity(grouped.len());
    for (key, group) in grouped {
        let mut profit = 0.0;
        let mut wagered = 0.0;
        for bet in &group {
            if let Some(p) = bet.settled_profit()? {
                profit += p;
                wagered += bet.stake;
            }
        }

        let wins = group.iter().filter(|b| b.result == BetResult::Win).count();
        let losses = group.iter().filter(|b| b.result == BetResult::Loss).count();
        let pushes = group.iter().filter(|b| b.result == BetResult::Push).count();
        let clvs = tracked_clv(group.iter().copied());

        results.push(DimensionPerformance {
            key,
            bets: group.len(),
            wins,
            losses,
            pushes,
            win_rate: win_rate(wins, losses, pushes),
            wagered,
            profit,
            roi: calculate_roi(profit, wagered),
            avg_clv: avg_by(&clvs, |c| *c),
        });
    }

    Ok(results)
}

/// Daily profit and loss for settled, timestamped bets, in date order
pub fn daily_profit_loss(records: &[BetRecord]) -> Result<Vec<(NaiveDate, f64)>> {
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for s in settle(records)? {
        if let Some(placed_at) = s.bet.placed_at {
            *daily.entry(placed_at.date_naive()).or_insert(0.0) += s.profit;
        }
    }
    Ok(daily.into_iter().collect())
}

/// Average CLV per key, over the records of each group that carry a CLV
pub fn clv_by<K, F>(records: &[BetRecord], key: F) -> BTreeMap<String, f64>
where
    K: ToString,
    F: Fn(&BetRecord) -> Option<K>,
{
    let tracked: Vec<&BetRecord> = records.iter().filter(|b| b.clv.is_some()).collect();

    group_by(&tracked, |b| {
        key(b)
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    })
    .into_iter()
    .map(|(key, group)| {
        let clv = avg_by(&group, |b| b.clv);
        (key, clv)
    })
    .collect()
}
