//! HTTP client for a trading-terminal bridge.
//!
//! The bridge fronts the desktop terminal and exposes its deal history call as
//! `POST {base_url}/history_deals_get`. Each request carries the account
//! credentials, so there is no session to open or shut down.

use super::{DataSourceError, DealSource};
use crate::config::AccountCredentials;
use crate::domain::{DealType, Decimal, PositionId, RawDeal, Symbol};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use chrono::{DateTime, NaiveDateTime};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct TerminalBridgeSource {
    client: Client,
    base_url: String,
    credentials: AccountCredentials,
}

impl TerminalBridgeSource {
    pub fn new(base_url: String, credentials: AccountCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    async fn post(
        &self,
        endpoint: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, DataSourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
                })?;

            let status = response.status();
            if status == 401 || status == 403 {
                return Err(backoff::Error::permanent(DataSourceError::Auth(format!(
                    "terminal rejected login {} on {}",
                    self.credentials.login, self.credentials.server
                ))));
            }
            if status == 429 {
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
        })
        .await
    }
}

#[async_trait]
impl DealSource for TerminalBridgeSource {
    async fn fetch_deals(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<RawDeal>, DataSourceError> {
        debug!(
            "Fetching deals for login={}, server={}, from={}, to={}",
            self.credentials.login, self.credentials.server, from, to
        );

        let payload = serde_json::json!({
            "login": self.credentials.login,
            "server": self.credentials.server,
            "password": self.credentials.password,
            "from": from.and_utc().timestamp(),
            "to": to.and_utc().timestamp(),
        });

        let response = self.post("history_deals_get", payload).await?;

        let deals_json = response
            .as_array()
            .ok_or_else(|| DataSourceError::ParseError("Expected array response".to_string()))?;

        let mut deals = Vec::with_capacity(deals_json.len());
        for deal_json in deals_json {
            match parse_deal(deal_json) {
                Ok(deal) => deals.push(deal),
                Err(e) => {
                    warn!("Failed to parse deal: {}", e);
                }
            }
        }

        info!("history_deals_get({}, {}) = {}", from, to, deals.len());
        Ok(deals)
    }
}

fn parse_amount(deal_json: &serde_json::Value, field: &str) -> Result<Decimal, DataSourceError> {
    let text = match deal_json.get(field) {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => {
            return Err(DataSourceError::ParseError(format!(
                "Missing {} field",
                field
            )))
        }
    };
    Decimal::from_str_canonical(&text)
        .map_err(|e| DataSourceError::ParseError(format!("Invalid {}: {}", field, e)))
}

/// Parse one deal object. A missing `time` is kept as `None` so the
/// normalizer can reject the batch; any other missing field skips the deal.
fn parse_deal(deal_json: &serde_json::Value) -> Result<RawDeal, DataSourceError> {
    let time = match deal_json.get("time").and_then(|v| v.as_i64()) {
        Some(secs) => Some(
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| DataSourceError::ParseError(format!("Invalid time: {}", secs)))?
                .naive_utc(),
        ),
        None => None,
    };

    let deal_type = deal_json
        .get("type")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| DataSourceError::ParseError("Missing type field".to_string()))?;

    let position_id = deal_json
        .get("position_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| DataSourceError::ParseError("Missing position_id field".to_string()))?;

    let symbol = deal_json
        .get("symbol")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(RawDeal {
        time,
        deal_type: DealType::from(deal_type),
        volume: parse_amount(deal_json, "volume")?,
        position_id: PositionId::new(position_id),
        price: parse_amount(deal_json, "price")?,
        commission: parse_amount(deal_json, "commission")?,
        swap: parse_amount(deal_json, "swap")?,
        profit: parse_amount(deal_json, "profit")?,
        fee: parse_amount(deal_json, "fee")?,
        symbol: Symbol::new(symbol),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_deal_valid() {
        let deal_json = serde_json::json!({
            "ticket": 1,
            "time": 1704196800,
            "type": 1,
            "volume": 0.01,
            "position_id": 123,
            "price": 2063.15,
            "commission": -0.07,
            "swap": 0.0,
            "profit": 4.2,
            "fee": 0.0,
            "symbol": "XAUUSD",
            "comment": ""
        });

        let deal = parse_deal(&deal_json).unwrap();
        assert_eq!(
            deal.time,
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
        );
        assert_eq!(deal.deal_type, DealType::Sell);
        assert_eq!(deal.position_id, PositionId::new(123));
        assert_eq!(deal.volume.to_canonical_string(), "0.01");
        assert_eq!(deal.commission.to_canonical_string(), "-0.07");
        assert_eq!(deal.symbol.as_str(), "XAUUSD");
    }

    #[test]
    fn test_parse_deal_balance_without_symbol() {
        let deal_json = serde_json::json!({
            "time": 1704067200,
            "type": 2,
            "volume": 0.0,
            "position_id": 0,
            "price": 0.0,
            "commission": 0.0,
            "swap": 0.0,
            "profit": "1000",
            "fee": 0.0
        });

        let deal = parse_deal(&deal_json).unwrap();
        assert_eq!(deal.deal_type, DealType::Balance);
        assert_eq!(deal.profit.to_canonical_string(), "1000");
        assert_eq!(deal.symbol.as_str(), "");
    }

    #[test]
    fn test_parse_deal_keeps_missing_time() {
        let deal_json = serde_json::json!({
            "type": 0,
            "volume": 1,
            "position_id": 5,
            "price": 1.0,
            "commission": 0,
            "swap": 0,
            "profit": 0,
            "fee": 0,
            "symbol": "GBPJPY"
        });

        let deal = parse_deal(&deal_json).unwrap();
        assert_eq!(deal.time, None);
    }

    #[test]
    fn test_parse_deal_missing_profit_errors() {
        let deal_json = serde_json::json!({
            "time": 1704067200,
            "type": 0,
            "volume": 1,
            "position_id": 5,
            "price": 1.0,
            "commission": 0,
            "swap": 0,
            "fee": 0,
            "symbol": "GBPJPY"
        });

        let err = parse_deal(&deal_json).unwrap_err();
        assert!(matches!(err, DataSourceError::ParseError(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = TerminalBridgeSource::new(
            "http://localhost:9000/".to_string(),
            AccountCredentials {
                login: 1,
                server: "Demo".to_string(),
                password: "secret".to_string(),
            },
        );
        assert_eq!(source.base_url, "http://localhost:9000");
    }
}
