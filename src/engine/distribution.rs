use crate::domain::{Ledger, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionScope {
    /// One count per symbol over the whole ledger.
    All,
    /// One count per symbol per day.
    Daily,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolCount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub symbol: Symbol,
    pub count: usize,
}

/// Non-deposit rows per symbol. `All` is ordered by symbol; `Daily` by most
/// recent day first, then symbol.
pub fn symbol_distribution(ledger: &Ledger, scope: DistributionScope) -> Vec<SymbolCount> {
    match scope {
        DistributionScope::All => {
            let mut counts: BTreeMap<&Symbol, usize> = BTreeMap::new();
            for (deal, _) in ledger.trades() {
                *counts.entry(&deal.symbol).or_default() += 1;
            }
            counts
                .into_iter()
                .map(|(symbol, count)| SymbolCount {
                    date: None,
                    symbol: symbol.clone(),
                    count,
                })
                .collect()
        }
        DistributionScope::Daily => {
            let mut counts: BTreeMap<(NaiveDate, &Symbol), usize> = BTreeMap::new();
            for (deal, _) in ledger.trades() {
                *counts.entry((deal.date, &deal.symbol)).or_default() += 1;
            }
            let mut rows: Vec<SymbolCount> = counts
                .into_iter()
                .map(|((date, symbol), count)| SymbolCount {
                    date: Some(date),
                    symbol: symbol.clone(),
                    count,
                })
                .collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.symbol.cmp(&b.symbol)));
            rows
        }
    }
}

/// The daily distribution restricted to its most recent day.
pub fn latest_day_distribution(rows: &[SymbolCount]) -> Vec<SymbolCount> {
    let Some(latest) = rows.iter().filter_map(|r| r.date).max() else {
        return Vec::new();
    };
    rows.iter()
        .filter(|r| r.date == Some(latest))
        .cloned()
        .collect()
}
