//! Display formatting for odds, percentages, currency and CLV

use serde::{Deserialize, Serialize};
use std::fmt;

/// Format American odds with an explicit sign on positive prices
pub fn format_odds(odds: i32) -> String {
    if odds >= 0 {
        format!("+{}", odds)
    } else {
        odds.to_string()
    }
}

/// Format a ratio as a percentage (0.0562 -> "5.6%")
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Format a USD amount with thousands separators ("$1,234.50", "-$12.00")
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Closing line value rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClvRating {
    Elite,
    Professional,
    Competent,
    BreakEven,
    Negative,
}

impl ClvRating {
    /// Rate an average CLV expressed in percentage points
    pub fn from_clv(clv: f64) -> Self {
        if clv >= 3.0 {
            ClvRating::Elite
        } else if clv >= 2.0 {
            ClvRating::Professional
        } else if clv >= 1.0 {
            ClvRating::Competent
        } else if clv >= 0.0 {
            ClvRating::BreakEven
        } else {
            ClvRating::Negative
        }
    }
}

impl fmt::Display for ClvRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClvRating::Elite => "Elite",
            ClvRating::Professional => "Professional",
            ClvRating::Competent => "Competent",
            ClvRating::BreakEven => "Break-even",
            ClvRating::Negative => "Negative",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_odds() {
        assert_eq!(format_odds(150), "+150");
        assert_eq!(format_odds(-110), "-110");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0562, 1), "5.6%");
        assert_eq!(format_percent(0.25, 0), "25%");
        assert_eq!(format_percent(-0.031, 2), "-3.10%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-12.0), "-$12.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_clv_rating() {
        assert_eq!(ClvRating::from_clv(3.0), ClvRating::Elite);
        assert_eq!(ClvRating::from_clv(2.4), ClvRating::Professional);
        assert_eq!(ClvRating::from_clv(1.0), ClvRating::Competent);
        assert_eq!(ClvRating::from_clv(0.0), ClvRating::BreakEven);
        assert_eq!(ClvRating::from_clv(-0.2), ClvRating::Negative);
        assert_eq!(ClvRating::BreakEven.to_string(), "Break-even");
    }
}
