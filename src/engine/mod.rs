//! Pure aggregation engine over a normalized ledger.
//!
//! Every operation borrows the ledger immutably and returns a freshly
//! allocated result; nothing is cached between calls. An operation whose
//! filter leaves no rows returns an empty result rather than an error.

use crate::domain::{Decimal, Ledger};
use serde::{Deserialize, Serialize};

pub mod distribution;
pub mod growth;
pub mod period;
pub mod pips;
pub mod summary;
pub mod trades;

pub use distribution::{latest_day_distribution, symbol_distribution, DistributionScope, SymbolCount};
pub use growth::{portfolio_growth, GrowthPoint};
pub use period::{period_growth, period_profit, PeriodGrowth, PeriodKey, PeriodProfit};
pub use pips::{latest_pip_growth, pip_growth, PipGrowth, PipTable};
pub use summary::{daily_summary, total_summary, DailySummary, GrowthDelta, TotalSummary};
pub use trades::{daily_trade_counts, trade_count, DailyTradeCount};

/// Aggregation period for growth tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// ISO week number within the calendar year.
    Week,
    /// Calendar month.
    Month,
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

/// Sum of all balance operations (deposits minus withdrawals).
pub fn total_deposit(ledger: &Ledger) -> Decimal {
    ledger.balance_ops().map(|d| d.profit).sum()
}
