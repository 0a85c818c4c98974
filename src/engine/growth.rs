use crate::domain::{Decimal, Ledger};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::total_deposit;

/// Daily net result, optionally with the account balance at the end of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub profit: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_balance: Option<Decimal>,
}

/// Net result per trading day, most recent day first.
///
/// With `include_balance`, each day also carries `deposits + cumulative
/// profit` up to and including that day, accumulated in ascending date order.
/// Deposit-only days do not produce rows.
pub fn portfolio_growth(ledger: &Ledger, include_balance: bool) -> Vec<GrowthPoint> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (deal, total) in ledger.trades() {
        *by_date.entry(deal.date).or_default() += total;
    }

    let deposit = total_deposit(ledger);
    let mut balance = deposit;
    let mut points: Vec<GrowthPoint> = by_date
        .into_iter()
        .map(|(date, profit)| {
            balance += profit;
            GrowthPoint {
                date,
                profit,
                running_balance: include_balance.then_some(balance),
            }
        })
        .collect();

    points.reverse();
    points
}
