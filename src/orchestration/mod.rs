//! Extract, normalize and persist: the run that rebuilds the snapshot.

pub mod refresh;

pub use refresh::{RefreshError, RefreshReport, Refresher};
