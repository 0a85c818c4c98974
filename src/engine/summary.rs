//! Headline figures for the "Daily" and "Total" dashboard tabs.

use crate::domain::{round1, Decimal, Ledger};
use chrono::NaiveDate;
use serde::Serialize;

use super::{daily_trade_counts, period_growth, portfolio_growth, total_deposit, trade_count, Period};

/// Growth of the current period with the previous one as its delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthDelta {
    #[serde(serialize_with = "crate::domain::decimal::ratio::option::serialize")]
    pub current: Option<f64>,
    #[serde(serialize_with = "crate::domain::decimal::ratio::option::serialize")]
    pub previous: Option<f64>,
}

impl GrowthDelta {
    fn of(ledger: &Ledger, period: Period) -> Self {
        let rows = period_growth(ledger, period);
        GrowthDelta {
            current: rows.first().map(|r| r.growth_pct),
            previous: rows.get(1).map(|r| r.growth_pct),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Most recent trading day, `None` before the first trade.
    pub date: Option<NaiveDate>,
    pub deposit: Decimal,
    pub portfolio_value: Option<Decimal>,
    pub profit_loss: Option<Decimal>,
    #[serde(serialize_with = "crate::domain::decimal::ratio::option::serialize")]
    pub profit_loss_pct: Option<f64>,
    pub commissions: Decimal,
    pub swaps: Decimal,
    pub trades: usize,
    pub weekly_growth: GrowthDelta,
    pub monthly_growth: GrowthDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSummary {
    pub deposit: Decimal,
    pub portfolio_growth: Option<Decimal>,
    #[serde(serialize_with = "crate::domain::decimal::ratio::option::serialize")]
    pub portfolio_growth_pct: Option<f64>,
    pub commissions: Decimal,
    pub swaps: Decimal,
    pub trades: usize,
}

/// Latest day's profit as a share of the balance before it.
fn gain_or_loss_pct(profit: Decimal, value: Decimal) -> f64 {
    let p = profit.to_f64();
    let v = value.to_f64();
    let before = if profit.is_negative() {
        v + p.abs()
    } else {
        v - p.abs()
    };
    round1(p / before * 100.0)
}

pub fn daily_summary(ledger: &Ledger) -> DailySummary {
    let latest = portfolio_growth(ledger, true).into_iter().next();
    let portfolio_value = latest.as_ref().and_then(|g| g.running_balance);
    let profit_loss = latest.as_ref().map(|g| g.profit);
    let profit_loss_pct = match (profit_loss, portfolio_value) {
        (Some(p), Some(v)) => Some(gain_or_loss_pct(p, v)),
        _ => None,
    };

    // commissions and swaps are booked on every row type
    let (commissions, swaps) = match ledger.latest_date() {
        Some(day) => ledger
            .deals()
            .iter()
            .filter(|d| d.date == day)
            .fold((Decimal::zero(), Decimal::zero()), |(c, s), d| {
                (c + d.commission, s + d.swap)
            }),
        None => (Decimal::zero(), Decimal::zero()),
    };

    let trades = daily_trade_counts(ledger)
        .first()
        .map(|c| c.count)
        .unwrap_or(0);

    DailySummary {
        date: latest.map(|g| g.date),
        deposit: total_deposit(ledger),
        portfolio_value,
        profit_loss,
        profit_loss_pct,
        commissions,
        swaps,
        trades,
        weekly_growth: GrowthDelta::of(ledger, Period::Week),
        monthly_growth: GrowthDelta::of(ledger, Period::Month),
    }
}

pub fn total_summary(ledger: &Ledger) -> TotalSummary {
    let deposit = total_deposit(ledger);
    let value = portfolio_growth(ledger, true)
        .first()
        .and_then(|g| g.running_balance);

    TotalSummary {
        deposit,
        portfolio_growth: value.map(|v| v - deposit),
        portfolio_growth_pct: value.map(|v| round1(v.to_f64() / deposit.to_f64() * 100.0) - 100.0),
        commissions: ledger.deals().iter().map(|d| d.commission).sum(),
        swaps: ledger.deals().iter().map(|d| d.swap).sum(),
        trades: trade_count(ledger),
    }
}
