//! Aggregation and summary statistics over bet records

pub mod aggregate;
pub mod metrics;

pub use aggregate::{avg_by, group_by, sort_by, sum_by, SortOrder};
pub use metrics::{
    clv_by, daily_profit_loss, performance_by, summarize, BetSummary, DimensionPerformance,
};
