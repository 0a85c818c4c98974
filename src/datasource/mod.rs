//! Data source abstraction for fetching deal history from the trading venue.

use crate::domain::RawDeal;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::fmt;

pub mod mock;
pub mod terminal;

pub use mock::MockDealSource;
pub use terminal::TerminalBridgeSource;

/// Source of raw deal history.
///
/// Implementations own their timeout and retry policy; callers treat any
/// error as fatal for the current run.
#[async_trait]
pub trait DealSource: Send + Sync + fmt::Debug {
    /// Fetch every deal in a time range.
    ///
    /// # Arguments
    /// * `from` - Start of the range (inclusive), venue time
    /// * `to` - End of the range (inclusive), venue time
    ///
    /// # Returns
    /// Deals in the order the venue reports them
    async fn fetch_deals(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<RawDeal>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// Login rejected by the venue
    Auth(String),
    /// HTTP error (e.g., 429 rate limit, 5xx server error)
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed response)
    ParseError(String),
    /// Rate limit exceeded
    RateLimited,
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::Auth(msg) => write!(f, "Login failed: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
        }
    }
}

impl std::error::Error for DataSourceError {}
