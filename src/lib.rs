pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod orchestration;

pub use config::Config;
pub use datasource::{DataSourceError, DealSource, MockDealSource, TerminalBridgeSource};
pub use domain::{Deal, DealType, Decimal, Ledger, PositionId, RawDeal, Symbol};
pub use error::AppError;
pub use ledger::{normalize, read_snapshot, write_snapshot, SchemaError, SnapshotError};
pub use orchestration::{RefreshError, RefreshReport, Refresher};
