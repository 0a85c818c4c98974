//! Profit expressed in pips per instrument and day.

use crate::domain::{round1, Decimal, Ledger, PositionId, Symbol};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Value of one pip per lot for each supported instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct PipTable {
    values: HashMap<String, f64>,
}

impl PipTable {
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Add or replace the pip value of a symbol.
    pub fn with_value(mut self, symbol: &str, pip_value: f64) -> Self {
        self.values.insert(symbol.to_string(), pip_value);
        self
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for PipTable {
    fn default() -> Self {
        Self::empty()
            .with_value("XAUUSD", 0.095)
            .with_value("GBPJPY", 0.063)
    }
}

/// Daily result of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipGrowth {
    pub date: NaiveDate,
    pub symbol: Symbol,
    pub volume: Decimal,
    pub total_profit: Decimal,
    /// `total_profit / (volume * 100 * pip_value)`, one decimal place.
    /// `None` when the symbol has no pip value.
    #[serde(serialize_with = "crate::domain::decimal::ratio::option::serialize")]
    pub pips: Option<f64>,
}

/// Per `(date, symbol)` result, ordered by date then symbol.
///
/// Legs are first collapsed per `(date, position, symbol, volume)`, so the
/// open and close legs of a position contribute its volume once.
pub fn pip_growth(ledger: &Ledger, table: &PipTable) -> Vec<PipGrowth> {
    let mut per_position: BTreeMap<(NaiveDate, PositionId, Symbol, Decimal), Decimal> =
        BTreeMap::new();
    for (deal, total) in ledger.trades() {
        let key = (deal.date, deal.position_id, deal.symbol.clone(), deal.volume);
        *per_position.entry(key).or_default() += total;
    }

    let mut per_symbol: BTreeMap<(NaiveDate, Symbol), (Decimal, Decimal)> = BTreeMap::new();
    for ((date, _, symbol, volume), total) in per_position {
        let entry = per_symbol.entry((date, symbol)).or_default();
        entry.0 += volume;
        entry.1 += total;
    }

    per_symbol
        .into_iter()
        .map(|((date, symbol), (volume, total_profit))| {
            let pips = table.get(symbol.as_str()).map(|pip_value| {
                round1(total_profit.to_f64() / (volume.to_f64() * 100.0 * pip_value))
            });
            PipGrowth {
                date,
                symbol,
                volume,
                total_profit,
                pips,
            }
        })
        .collect()
}

/// Rows of the most recent date only.
pub fn latest_pip_growth(rows: &[PipGrowth]) -> Vec<PipGrowth> {
    let Some(latest) = rows.iter().map(|r| r.date).max() else {
        return Vec::new();
    };
    rows.iter().filter(|r| r.date == latest).cloned().collect()
}
