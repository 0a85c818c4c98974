//! Mock data source for testing without network calls.

use super::{DataSourceError, DealSource};
use crate::domain::RawDeal;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Mock data source that returns predefined deals, or a predefined failure.
#[derive(Debug, Clone, Default)]
pub struct MockDealSource {
    deals: Vec<RawDeal>,
    failure: Option<DataSourceError>,
}

impl MockDealSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deal(mut self, deal: RawDeal) -> Self {
        self.deals.push(deal);
        self
    }

    pub fn with_deals(mut self, deals: Vec<RawDeal>) -> Self {
        self.deals.extend(deals);
        self
    }

    /// Make every fetch fail with `err`.
    pub fn failing(mut self, err: DataSourceError) -> Self {
        self.failure = Some(err);
        self
    }
}

#[async_trait]
impl DealSource for MockDealSource {
    async fn fetch_deals(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<RawDeal>, DataSourceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        // deals without a timestamp are passed through untouched
        Ok(self
            .deals
            .iter()
            .filter(|d| d.time.map_or(true, |t| t >= from && t <= to))
            .cloned()
            .collect())
    }
}
