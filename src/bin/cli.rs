//! SportsEdge CLI - Command-line interface for betting math

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use sportsedge::analytics::{daily_profit_loss, performance_by, summarize, DimensionPerformance};
use sportsedge::core::kelly::StakeSizer;
use sportsedge::core::odds::{american_to_decimal, decimal_to_american, implied_probability};
use sportsedge::format::{format_currency, format_odds, format_percent, ClvRating};
use sportsedge::{BetRecord, BettingConfig, SignalTier};

#[derive(Parser)]
#[command(name = "sportsedge")]
#[command(author, version, about = "Sports betting math CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to betting config JSON (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert between American odds, decimal odds and implied probability
    Convert {
        /// American odds (e.g. -110, 150)
        #[arg(long, allow_negative_numbers = true, conflicts_with = "decimal")]
        american: Option<i32>,

        /// Decimal odds (e.g. 1.91)
        #[arg(long)]
        decimal: Option<f64>,
    },

    /// Recommend a stake using fractional Kelly
    Size {
        /// Model win probability (0-1)
        #[arg(short, long)]
        probability: f64,

        /// American odds
        #[arg(short, long, allow_negative_numbers = true)]
        odds: i32,

        /// Current bankroll
        #[arg(short, long, default_value = "10000")]
        bankroll: f64,

        /// Kelly multiplier (overrides config, 0.25 = quarter Kelly)
        #[arg(long)]
        kelly: Option<f64>,
    },

    /// Classify a probability into a signal tier
    Tier {
        /// Model win probability (0-1)
        #[arg(short, long)]
        probability: f64,
    },

    /// Summarize a bet history JSON file
    Summary {
        /// JSON array of bet records
        #[arg(long)]
        bets: PathBuf,

        /// Break results down by this dimension
        #[arg(long, value_enum, default_value = "tier")]
        by: Dimension,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dimension {
    Tier,
    Sport,
    BetType,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = load_config(cli.config.as_deref())?;
    debug!("Using config: {:?}", config);

    println!("{}", "SportsEdge CLI v0.1.0".cyan().bold());
    println!();

    match cli.command {
        Some(Commands::Convert { american, decimal }) => run_convert(american, decimal)?,
        Some(Commands::Size {
            probability,
            odds,
            bankroll,
            kelly,
        }) => run_size(&config, probability, odds, bankroll, kelly)?,
        Some(Commands::Tier { probability }) => run_tier(&config, probability)?,
        Some(Commands::Summary { bets, by }) => run_summary(&bets, by)?,
        None => println!("Use --help for usage information."),
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BettingConfig> {
    let config = match path {
        Some(p) => BettingConfig::from_file(p)
            .with_context(|| format!("Failed to load config from {:?}", p))?,
        None => BettingConfig::default(),
    };

    config
        .apply_env_overrides()
        .context("Invalid SPORTSEDGE_* environment override")
}

fn run_convert(american: Option<i32>, decimal: Option<f64>) -> Result<()> {
    let odds = match (american, decimal) {
        (Some(a), _) => a,
        (None, Some(d)) => decimal_to_american(d)?,
        (None, None) => anyhow::bail!("Pass either --american or --decimal"),
    };

    let dec = american_to_decimal(odds)?;
    let implied = implied_probability(odds)?;

    println!("{}", "Odds Conversion:".yellow().bold());
    println!("{:<20} {}", "American", format_odds(odds));
    println!("{:<20} {:.3}", "Decimal", dec);
    println!("{:<20} {}", "Implied probability", format_percent(implied, 2));

    Ok(())
}

fn tier_label(tier: SignalTier) -> colored::ColoredString {
    let label = format!("Tier {}", tier);
    match tier {
        SignalTier::A => label.green().bold(),
        SignalTier::B => label.blue().bold(),
        SignalTier::C => label.yellow(),
        SignalTier::D => label.dimmed(),
    }
}

fn run_size(
    config: &BettingConfig,
    probability: f64,
    odds: i32,
    bankroll: f64,
    kelly: Option<f64>,
) -> Result<()> {
    let mut sizer = StakeSizer::from_config(bankroll, config)?;
    if let Some(k) = kelly {
        sizer = StakeSizer::new(bankroll, k, sizer.max_bet_percent, sizer.min_edge)?;
    }

    let sizing = sizer.size(probability, odds)?;
    let tier = config.classifier().classify(probability);

    println!(
        "{}: {} at {} ({})",
        "Sizing".green(),
        format_percent(probability, 1),
        format_odds(odds),
        tier_label(tier)
    );
    println!();

    let edge_str = format_percent(sizing.edge, 2);
    let edge_colored = if sizing.edge > 0.0 {
        edge_str.green()
    } else {
        edge_str.red()
    };

    println!("{:<22} {}", "Implied probability", format_percent(implied_probability(odds)?, 2));
    println!("{:<22} {}", "Edge", edge_colored);
    println!("{:<22} {}", "Full Kelly", format_percent(sizing.kelly_fraction, 2));
    println!(
        "{:<22} {} (x{:.2})",
        "Recommended fraction",
        format_percent(sizing.recommended_fraction, 2),
        sizer.kelly_fraction
    );
    println!(
        "{:<22} {}",
        "Recommended stake",
        format_currency(sizing.recommended_stake).bold()
    );
    println!();

    if sizing.max_bet_capped {
        println!(
            "{} Capped at max bet {} of bankroll",
            "→".yellow(),
            format_percent(sizer.max_bet_percent, 1)
        );
    }
    if sizing.edge < sizer.min_edge {
        println!(
            "{} Edge below minimum {}; no bet",
            "→".red(),
            format_percent(sizer.min_edge, 1)
        );
    }

    Ok(())
}

fn run_tier(config: &BettingConfig, probability: f64) -> Result<()> {
    sportsedge::error::validate_probability(probability)?;

    let thresholds = config.tier_thresholds;
    let tier = config.classifier().classify(probability);

    println!(
        "{} {} → {}",
        "Probability".green(),
        format_percent(probability, 1),
        tier_label(tier)
    );
    println!(
        "{}",
        format!(
            "(A ≥ {}, B ≥ {}, C ≥ {})",
            format_percent(thresholds.a_min(), 0),
            format_percent(thresholds.b_min(), 0),
            format_percent(thresholds.c_min(), 0)
        )
        .dimmed()
    );

    Ok(())
}

fn run_summary(path: &Path, by: Dimension) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let bets: Vec<BetRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bet records from {:?}", path))?;

    let summary = summarize(&bets)?;

    println!("{}", "Bet Summary:".yellow().bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Total bets", summary.total_bets);
    println!(
        "{:<20} {}W / {}L / {}P ({} pending)",
        "Record", summary.wins, summary.losses, summary.pushes, summary.pending
    );
    println!("{:<20} {}", "Win rate", format_percent(summary.win_rate, 1));
    println!("{:<20} {}", "Wagered", format_currency(summary.total_wagered));

    let profit_str = format_currency(summary.net_profit);
    let profit_colored = if summary.net_profit > 0.0 {
        profit_str.green()
    } else if summary.net_profit < 0.0 {
        profit_str.red()
    } else {
        profit_str.normal()
    };
    println!("{:<20} {}", "Net profit", profit_colored);
    println!("{:<20} {}", "ROI", format_percent(summary.roi, 2));
    println!("{:<20} {:.2}", "Profit factor", summary.profit_factor);
    println!("{:<20} {}", "Max drawdown", format_currency(summary.max_drawdown));
    println!(
        "{:<20} {:.2}% ({})",
        "Average CLV",
        summary.avg_clv,
        ClvRating::from_clv(summary.avg_clv)
    );
    println!(
        "{:<20} {}",
        "Positive CLV rate",
        format_percent(summary.positive_clv_rate, 1)
    );
    println!();

    let breakdown = match by {
        Dimension::Tier => performance_by(&bets, |b| b.signal_tier)?,
        Dimension::Sport => performance_by(&bets, |b| b.sport)?,
        Dimension::BetType => performance_by(&bets, |b| b.bet_type)?,
    };
    print_breakdown(by, &breakdown);

    let daily = daily_profit_loss(&bets)?;
    if !daily.is_empty() {
        println!("{}", "Daily P/L:".yellow().bold());
        for (date, profit) in &daily {
            println!("{:<12} {:>14}", date.format("%Y-%m-%d"), format_currency(*profit));
        }
        println!();
    }

    Ok(())
}

fn print_breakdown(by: Dimension, rows: &[DimensionPerformance]) {
    let title = match by {
        Dimension::Tier => "Performance by Tier:",
        Dimension::Sport => "Performance by Sport:",
        Dimension::BetType => "Performance by Bet Type:",
    };

    println!("{}", title.yellow().bold());
    println!(
        "{:<10} {:>6} {:>9} {:>14} {:>9} {:>8}",
        "Key", "Bets", "Win%", "Profit", "ROI", "CLV"
    );
    println!("{}", "-".repeat(60));

    for row in rows {
        println!(
            "{:<10} {:>6} {:>9} {:>14} {:>9} {:>7.2}%",
            row.key,
            row.bets,
            format_percent(row.win_rate, 1),
            format_currency(row.profit),
            format_percent(row.roi, 1),
            row.avg_clv
        );
    }
    println!();
}
