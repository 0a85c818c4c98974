use crate::domain::{DealType, Ledger};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Number of trades opened on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTradeCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Distinct positions among buy-type deals. Several legs of one position
/// count once.
pub fn trade_count(ledger: &Ledger) -> usize {
    ledger
        .deals()
        .iter()
        .filter(|d| d.deal_type == DealType::Buy)
        .map(|d| d.position_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Buy-type deal rows per day, most recent day first.
pub fn daily_trade_counts(ledger: &Ledger) -> Vec<DailyTradeCount> {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for deal in ledger.deals().iter().filter(|d| d.deal_type == DealType::Buy) {
        *by_date.entry(deal.date).or_default() += 1;
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, count)| DailyTradeCount { date, count })
        .collect()
}
