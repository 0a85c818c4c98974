//! Deal records: the raw rows returned by the venue and the normalized ledger
//! rows every aggregation works on.

use crate::domain::{Decimal, DealType, PositionId, Symbol};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One deal as returned by the trading venue.
///
/// `time` is optional because the venue payload is not trusted; the normalizer
/// rejects rows without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDeal {
    pub time: Option<NaiveDateTime>,
    pub deal_type: DealType,
    pub volume: Decimal,
    pub position_id: PositionId,
    pub price: Decimal,
    pub commission: Decimal,
    pub swap: Decimal,
    pub profit: Decimal,
    pub fee: Decimal,
    pub symbol: Symbol,
}

/// A normalized ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// Calendar day of the venue timestamp; the only grouping key.
    pub date: NaiveDate,
    /// Time of day, absent for rows loaded back from a snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub deal_type: DealType,
    pub volume: Decimal,
    pub position_id: PositionId,
    pub price: Decimal,
    pub commission: Decimal,
    pub swap: Decimal,
    pub profit: Decimal,
    pub fee: Decimal,
    pub symbol: Symbol,
}

impl Deal {
    /// Net result of the row: `profit + swap + commission + fee`.
    ///
    /// Balance rows carry the deposited amount in `profit` and have no net
    /// result, so this is `None` for them.
    pub fn total_profit(&self) -> Option<Decimal> {
        if self.deal_type.is_balance() {
            None
        } else {
            Some(self.profit + self.swap + self.commission + self.fee)
        }
    }

    pub fn is_balance(&self) -> bool {
        self.deal_type.is_balance()
    }
}

/// An ordered, immutable collection of normalized deals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    deals: Vec<Deal>,
}

impl Ledger {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Non-deposit rows paired with their net result.
    pub fn trades(&self) -> impl Iterator<Item = (&Deal, Decimal)> + '_ {
        self.deals
            .iter()
            .filter_map(|d| d.total_profit().map(|p| (d, p)))
    }

    /// Balance operation rows.
    pub fn balance_ops(&self) -> impl Iterator<Item = &Deal> + '_ {
        self.deals.iter().filter(|d| d.is_balance())
    }

    /// Most recent date present in the ledger, any row type.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.deals.iter().map(|d| d.date).max()
    }
}
