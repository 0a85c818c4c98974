use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveDateTime};
use fxboard::api::{self, AppState};
use fxboard::datasource::{DataSourceError, MockDealSource};
use fxboard::domain::{DealType, Decimal, PositionId, RawDeal, Symbol};
use fxboard::engine::PipTable;
use fxboard::Refresher;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    snapshot_path: std::path::PathBuf,
    _temp: TempDir,
}

fn setup_test_app(source: MockDealSource) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("fx_history.csv");
    let refresher = Refresher::new(
        Arc::new(source),
        snapshot_path.clone(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    );
    let app = api::create_router(AppState::new(PipTable::default(), refresher));

    TestApp {
        app,
        snapshot_path,
        _temp: temp_dir,
    }
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn raw(time: NaiveDateTime, deal_type: i64, position_id: i64, symbol: &str, profit: &str) -> RawDeal {
    RawDeal {
        time: Some(time),
        deal_type: DealType::from(deal_type),
        volume: Decimal::from(1),
        position_id: PositionId::new(position_id),
        price: Decimal::zero(),
        commission: Decimal::zero(),
        swap: Decimal::zero(),
        profit: Decimal::from_str(profit).unwrap(),
        fee: Decimal::zero(),
        symbol: Symbol::new(symbol.to_string()),
    }
}

/// One deposit, a winning gold trade in ISO week 1 and a losing yen trade
/// in week 2.
fn two_week_history() -> MockDealSource {
    MockDealSource::new().with_deals(vec![
        raw(at(1, 8), 2, 0, "", "1000"),
        raw(at(2, 9), 0, 1, "XAUUSD", "0"),
        raw(at(2, 15), 1, 1, "XAUUSD", "19"),
        raw(at(9, 10), 0, 2, "GBPJPY", "0"),
        raw(at(9, 12), 1, 2, "GBPJPY", "-30"),
    ])
}

async fn send(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn refreshed_app() -> TestApp {
    let test_app = setup_test_app(two_week_history());
    let (status, _) = send(&test_app.app, "POST", "/v1/refresh").await;
    assert_eq!(status, StatusCode::OK);
    test_app
}

#[tokio::test]
async fn test_health_endpoint() {
    let test_app = setup_test_app(MockDealSource::new());
    let (status, body) = send(&test_app.app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_tracks_snapshot() {
    let test_app = setup_test_app(two_week_history());
    let (_, body) = send(&test_app.app, "GET", "/ready").await;
    assert_eq!(body["snapshot"], false);

    send(&test_app.app, "POST", "/v1/refresh").await;
    let (status, body) = send(&test_app.app, "GET", "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_refresh_reports_counts() {
    let test_app = setup_test_app(two_week_history());
    let (status, body) = send(&test_app.app, "POST", "/v1/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dealsFetched"], 5);
    assert_eq!(body["rowsWritten"], 5);
    assert!(test_app.snapshot_path.exists());
}

#[tokio::test]
async fn test_refresh_failure_keeps_snapshot() {
    let test_app = setup_test_app(MockDealSource::new().failing(DataSourceError::RateLimited));
    std::fs::write(&test_app.snapshot_path, "previous").unwrap();

    let (status, body) = send(&test_app.app, "POST", "/v1/refresh").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Rate limited"));
    assert_eq!(
        std::fs::read_to_string(&test_app.snapshot_path).unwrap(),
        "previous"
    );
}

#[tokio::test]
async fn test_refresh_without_deals_is_not_found() {
    let test_app = setup_test_app(MockDealSource::new());
    let (status, _) = send(&test_app.app, "POST", "/v1/refresh").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!test_app.snapshot_path.exists());
}

#[tokio::test]
async fn test_missing_snapshot_is_not_found() {
    let test_app = setup_test_app(MockDealSource::new());
    let (status, body) = send(&test_app.app, "GET", "/v1/summary").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_schema_error_is_internal_error() {
    let test_app = setup_test_app(MockDealSource::new());
    std::fs::write(
        &test_app.snapshot_path,
        "date,type,volume,position_id,price,commission,swap,fee,symbol\n",
    )
    .unwrap();

    let (status, body) = send(&test_app.app, "GET", "/v1/growth").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("profit"));
}

#[tokio::test]
async fn test_summary_endpoint() {
    let test_app = refreshed_app().await;
    let (status, body) = send(&test_app.app, "GET", "/v1/summary").await;
    assert_eq!(status, StatusCode::OK);

    let daily = &body["daily"];
    assert_eq!(daily["date"], "2024-01-09");
    assert_eq!(daily["deposit"].as_f64(), Some(1000.0));
    assert_eq!(daily["portfolioValue"].as_f64(), Some(989.0));
    assert_eq!(daily["profitLoss"].as_f64(), Some(-30.0));
    assert_eq!(daily["profitLossPct"].as_f64(), Some(-2.9));
    assert_eq!(daily["trades"], 1);
    assert_eq!(daily["weeklyGrowth"]["current"].as_f64(), Some(1.9));
    assert!(daily["weeklyGrowth"]["previous"].is_null());

    let total = &body["total"];
    assert_eq!(total["portfolioGrowth"].as_f64(), Some(-11.0));
    let pct = total["portfolioGrowthPct"].as_f64().unwrap();
    assert!((pct + 1.1).abs() < 1e-9);
    assert_eq!(total["trades"], 2);
}

#[tokio::test]
async fn test_growth_endpoint() {
    let test_app = refreshed_app().await;

    let (status, body) = send(&test_app.app, "GET", "/v1/growth").await;
    assert_eq!(status, StatusCode::OK);
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["date"], "2024-01-09");
    assert_eq!(points[0]["profit"].as_f64(), Some(-30.0));
    assert!(points[0].get("runningBalance").is_none());

    let (_, body) = send(&test_app.app, "GET", "/v1/growth?balance=true").await;
    let points = body["points"].as_array().unwrap();
    assert_eq!(points[0]["runningBalance"].as_f64(), Some(989.0));
    assert_eq!(points[1]["runningBalance"].as_f64(), Some(1019.0));
}

#[tokio::test]
async fn test_period_growth_endpoint() {
    let test_app = refreshed_app().await;

    let (status, body) = send(&test_app.app, "GET", "/v1/period-growth?period=week").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "week");
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "2-2024");
    assert_eq!(rows[0]["priorProfit"].as_f64(), Some(19.0));
    assert_eq!(rows[0]["growthPct"].as_f64(), Some(1.9));

    // both trades fall in January
    let (_, body) = send(&test_app.app, "GET", "/v1/period-growth?period=month").await;
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_period_growth_rejects_unknown_period() {
    let test_app = refreshed_app().await;
    let (status, body) = send(&test_app.app, "GET", "/v1/period-growth?period=day").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("period"));
}

#[tokio::test]
async fn test_bad_flag_values_are_json_bad_requests() {
    let test_app = refreshed_app().await;

    let (status, body) = send(&test_app.app, "GET", "/v1/growth?balance=yes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("balance"));

    let (status, body) = send(&test_app.app, "GET", "/v1/pips?latest=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("latest"));
}

#[tokio::test]
async fn test_period_profit_endpoint() {
    let test_app = refreshed_app().await;
    let (status, body) = send(&test_app.app, "GET", "/v1/period-profit?period=week").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["label"], "1-2024");
    assert_eq!(rows[0]["totalProfit"].as_f64(), Some(19.0));
    assert_eq!(rows[1]["totalProfit"].as_f64(), Some(-30.0));
}

#[tokio::test]
async fn test_trades_endpoint() {
    let test_app = refreshed_app().await;
    let (status, body) = send(&test_app.app, "GET", "/v1/trades").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let daily = body["daily"].as_array().unwrap();
    assert_eq!(daily[0]["date"], "2024-01-09");
    assert_eq!(daily[0]["count"], 1);
}

#[tokio::test]
async fn test_pips_endpoint() {
    let test_app = refreshed_app().await;

    let (status, body) = send(&test_app.app, "GET", "/v1/pips").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["symbol"], "XAUUSD");
    assert_eq!(rows[0]["pips"].as_f64(), Some(2.0));

    let (_, body) = send(&test_app.app, "GET", "/v1/pips?latest=true").await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["symbol"], "GBPJPY");
}

#[tokio::test]
async fn test_symbols_endpoint() {
    let test_app = refreshed_app().await;

    let (status, body) = send(&test_app.app, "GET", "/v1/symbols").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"], "all");
    let symbols = body["symbols"].as_array().unwrap();
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols[0]["symbol"], "GBPJPY");
    assert_eq!(symbols[0]["count"], 2);
    assert!(symbols[0].get("date").is_none());

    let (_, body) = send(&test_app.app, "GET", "/v1/symbols?scope=latest").await;
    let symbols = body["symbols"].as_array().unwrap();
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0]["date"], "2024-01-09");

    let (status, _) = send(&test_app.app, "GET", "/v1/symbols?scope=hourly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
