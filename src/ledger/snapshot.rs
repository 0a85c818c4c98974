//! Flat CSV snapshot of the normalized ledger.
//!
//! The snapshot is rewritten from scratch on every extraction run and is the
//! only state the dashboard reads.

use crate::domain::{Deal, DealType, Decimal, Ledger, PositionId, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::SchemaError;

/// Snapshot header, in file order.
pub const SNAPSHOT_COLUMNS: [&str; 10] = [
    "date",
    "type",
    "volume",
    "position_id",
    "price",
    "commission",
    "swap",
    "profit",
    "fee",
    "symbol",
];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<csv::Error> for SnapshotError {
    fn from(err: csv::Error) -> Self {
        SnapshotError::Csv(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Row {
    date: NaiveDate,
    #[serde(rename = "type")]
    deal_type: i64,
    volume: String,
    position_id: i64,
    price: String,
    commission: String,
    swap: String,
    profit: String,
    fee: String,
    symbol: String,
}

impl From<&Deal> for Row {
    fn from(deal: &Deal) -> Self {
        Row {
            date: deal.date,
            deal_type: deal.deal_type.code(),
            volume: deal.volume.to_canonical_string(),
            position_id: deal.position_id.as_i64(),
            price: deal.price.to_canonical_string(),
            commission: deal.commission.to_canonical_string(),
            swap: deal.swap.to_canonical_string(),
            profit: deal.profit.to_canonical_string(),
            fee: deal.fee.to_canonical_string(),
            symbol: deal.symbol.as_str().to_string(),
        }
    }
}

impl Row {
    fn into_deal(self, row: usize) -> Result<Deal, SchemaError> {
        let amount = |column: &str, value: &str| {
            Decimal::from_str_canonical(value).map_err(|e| SchemaError::InvalidValue {
                column: column.to_string(),
                row,
                reason: e.to_string(),
            })
        };

        Ok(Deal {
            date: self.date,
            time: None,
            deal_type: DealType::from(self.deal_type),
            volume: amount("volume", &self.volume)?,
            position_id: PositionId::new(self.position_id),
            price: amount("price", &self.price)?,
            commission: amount("commission", &self.commission)?,
            swap: amount("swap", &self.swap)?,
            profit: amount("profit", &self.profit)?,
            fee: amount("fee", &self.fee)?,
            symbol: Symbol::new(self.symbol),
        })
    }
}

/// Write the ledger sorted by date descending, replacing any previous file.
///
/// Rows sharing a date keep their ledger order. The file is written next to
/// the target and renamed over it, so readers never see a half-written
/// snapshot.
pub fn write_snapshot(path: &Path, ledger: &Ledger) -> Result<usize, SnapshotError> {
    let mut rows: Vec<&Deal> = ledger.deals().iter().collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let tmp_path = path.with_extension("csv.tmp");
    let written = write_rows(&tmp_path, &rows)
        .and_then(|()| std::fs::rename(&tmp_path, path).map_err(SnapshotError::from));
    if let Err(e) = written {
        match std::fs::remove_file(&tmp_path) {
            Err(cleanup) if cleanup.kind() != std::io::ErrorKind::NotFound => {
                warn!("Could not remove {}: {}", tmp_path.display(), cleanup)
            }
            _ => {}
        }
        return Err(e);
    }

    info!("Wrote {} ledger rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

fn write_rows(tmp_path: &Path, rows: &[&Deal]) -> Result<(), SnapshotError> {
    let mut writer = csv::Writer::from_path(tmp_path)?;
    // serialize() only emits a header with the first record
    if rows.is_empty() {
        writer.write_record(SNAPSHOT_COLUMNS)?;
    }
    for deal in rows {
        writer.serialize(Row::from(*deal))?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a snapshot back into a ledger, validating the header first.
pub fn read_snapshot(path: &Path) -> Result<Ledger, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in SNAPSHOT_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SchemaError::MissingColumn(column.to_string()).into());
        }
    }

    let mut deals = Vec::new();
    for (idx, record) in reader.deserialize::<Row>().enumerate() {
        let row = record?;
        deals.push(row.into_deal(idx + 1)?);
    }

    debug!("Read {} ledger rows from {}", deals.len(), path.display());
    Ok(Ledger::new(deals))
}
