//! Weekly and monthly aggregation.
//!
//! Rows are keyed by `(calendar year, ISO week)` or `(calendar year, month)`.
//! The year is the calendar year of the deal date, not the ISO week-year, so
//! the last days of December in ISO week 1 land in week 1 of the old year.

use crate::domain::{round1, Decimal, Ledger};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{total_deposit, Period};

/// Sort key of a period: year first, then week or month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodKey {
    pub year: i32,
    pub index: u32,
}

impl PeriodKey {
    pub fn of(date: NaiveDate, period: Period) -> Self {
        let index = match period {
            Period::Week => date.iso_week().week(),
            Period::Month => date.month(),
        };
        PeriodKey {
            year: date.year(),
            index,
        }
    }

    /// `week-year` / `month-year` label, e.g. `5-2024`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.index, self.year)
    }
}

/// Net result of one period, for the weekly/monthly bar charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodProfit {
    pub key: PeriodKey,
    pub label: String,
    pub total_profit: Decimal,
}

/// One row of the period growth table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodGrowth {
    pub key: PeriodKey,
    pub label: String,
    pub total_profit: Decimal,
    pub running_balance: Decimal,
    pub prior_profit: Decimal,
    /// `prior_profit / running_balance * 100`, one decimal place. Infinite or
    /// NaN when the balance is zero; those serialize as `"inf"`, `"-inf"` or
    /// `"NaN"`.
    #[serde(serialize_with = "crate::domain::decimal::ratio::serialize")]
    pub growth_pct: f64,
}

fn totals_by_period(ledger: &Ledger, period: Period) -> BTreeMap<PeriodKey, Decimal> {
    let mut totals: BTreeMap<PeriodKey, Decimal> = BTreeMap::new();
    for (deal, total) in ledger.trades() {
        *totals.entry(PeriodKey::of(deal.date, period)).or_default() += total;
    }
    totals
}

/// Net result per period, oldest first.
pub fn period_profit(ledger: &Ledger, period: Period) -> Vec<PeriodProfit> {
    totals_by_period(ledger, period)
        .into_iter()
        .map(|(key, total_profit)| PeriodProfit {
            key,
            label: key.label(),
            total_profit,
        })
        .collect()
}

/// Percentage growth of the two most recent periods, most recent first.
///
/// Each period's growth is the *previous* period's profit divided by this
/// period's running balance. Known quirk: this compares a flow against a
/// stock. The oldest period has no predecessor and never appears, so N
/// periods give at most `min(N - 1, 2)` rows.
pub fn period_growth(ledger: &Ledger, period: Period) -> Vec<PeriodGrowth> {
    let deposit = total_deposit(ledger);

    let mut balance = deposit;
    let rows: Vec<(PeriodKey, Decimal, Decimal)> = totals_by_period(ledger, period)
        .into_iter()
        .map(|(key, total)| {
            balance += total;
            (key, total, balance)
        })
        .collect();

    rows
        .windows(2)
        .map(|pair| {
            let (_, prior_profit, _) = pair[0];
            let (key, total_profit, running_balance) = pair[1];
            PeriodGrowth {
                key,
                label: key.label(),
                total_profit,
                running_balance,
                prior_profit,
                growth_pct: round1(prior_profit.to_f64() / running_balance.to_f64() * 100.0),
            }
        })
        .rev()
        .take(2)
        .collect()
}
