//! Domain types for the trade ledger.
//!
//! This module provides:
//! - Lossless money handling via the Decimal wrapper
//! - Domain primitives: DealType, PositionId, Symbol
//! - Raw venue deals and the normalized Ledger

pub mod deal;
pub mod decimal;
pub mod primitives;

pub use deal::{Deal, Ledger, RawDeal};
pub use decimal::{round1, Decimal};
pub use primitives::{DealType, PositionId, Symbol};
