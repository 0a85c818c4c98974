use crate::datasource::{DataSourceError, DealSource};
use crate::ledger::{normalize, write_snapshot, SchemaError, SnapshotError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Clone)]
pub struct Refresher {
    source: Arc<dyn DealSource>,
    snapshot_path: PathBuf,
    from_date: NaiveDate,
}

impl Refresher {
    pub fn new(source: Arc<dyn DealSource>, snapshot_path: PathBuf, from_date: NaiveDate) -> Self {
        Self {
            source,
            snapshot_path,
            from_date,
        }
    }

    pub fn snapshot_path(&self) -> &PathBuf {
        &self.snapshot_path
    }

    /// Fetch deals from `from_date` until now and rewrite the snapshot.
    pub async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        let to = chrono::Local::now().naive_local();
        self.refresh_until(to).await
    }

    /// Fetch deals in `[from_date, to]` and rewrite the snapshot.
    ///
    /// Any failure leaves the previous snapshot in place.
    pub async fn refresh_until(&self, to: NaiveDateTime) -> Result<RefreshReport, RefreshError> {
        let from = self.from_date.and_time(chrono::NaiveTime::MIN);
        info!("Extracting deals from {} to {}", from, to);

        let raw = self.source.fetch_deals(from, to).await?;
        if raw.is_empty() {
            warn!("No deals found between {} and {}", from, to);
            return Err(RefreshError::NoDeals);
        }

        let ledger = normalize(&raw)?;
        let rows_written = write_snapshot(&self.snapshot_path, &ledger)?;

        info!(
            "Refresh complete: {} deals fetched, {} rows written",
            raw.len(),
            rows_written
        );

        Ok(RefreshReport {
            deals_fetched: raw.len(),
            rows_written,
            from,
            to,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub deals_fetched: usize,
    pub rows_written: usize,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error("no deals returned for the requested window")]
    NoDeals,
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
