//! Domain primitives: DealType, PositionId, Symbol.

use serde::{Deserialize, Serialize};

/// Venue deal type code.
///
/// `0` and `1` are trade legs, `2` is a balance operation (deposit or
/// withdrawal). Any other code the venue emits is kept verbatim and counts as
/// a non-deposit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum DealType {
    Buy,
    Sell,
    Balance,
    Other(i64),
}

impl DealType {
    pub fn code(&self) -> i64 {
        match self {
            DealType::Buy => 0,
            DealType::Sell => 1,
            DealType::Balance => 2,
            DealType::Other(code) => *code,
        }
    }

    pub fn is_balance(&self) -> bool {
        matches!(self, DealType::Balance)
    }
}

impl From<i64> for DealType {
    fn from(code: i64) -> Self {
        match code {
            0 => DealType::Buy,
            1 => DealType::Sell,
            2 => DealType::Balance,
            other => DealType::Other(other),
        }
    }
}

impl From<DealType> for i64 {
    fn from(value: DealType) -> Self {
        value.code()
    }
}

impl std::fmt::Display for DealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Identifier of the logical trade a deal leg belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionId(pub i64);

impl PositionId {
    pub fn new(id: i64) -> Self {
        PositionId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Instrument symbol (e.g., "XAUUSD", "GBPJPY"). Empty on balance rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: String) -> Self {
        Symbol(symbol)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
