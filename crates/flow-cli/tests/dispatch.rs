//! 명령 실행 통합 테스트 (스텁 Provider 사용).

use async_trait::async_trait;
use chrono::NaiveDate;
use flow_cli::{execute, plan, render, run, Request, Status};
use flow_core::{FlowError, InvestorCategory, MarketSegment, QueryConfig};
use flow_data::{
    DataError, FundamentalRow, InvestorTradingRow, MarketDataProvider, NetPurchaseRow,
    ShortSellingRow, SupplyService,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::io::Cursor;

/// `005930`만 데이터를 갖고 `999999`는 항상 실패하는 스텁.
struct FixtureProvider;

const KNOWN: &str = "005930";
const BROKEN: &str = "999999";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn guard(ticker: &str) -> Result<bool, DataError> {
    if ticker == BROKEN {
        return Err(DataError::FetchError("KRX responded with 500".to_string()));
    }
    Ok(ticker == KNOWN)
}

#[async_trait]
impl MarketDataProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn investor_trading_by_date(
        &self,
        ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<InvestorTradingRow>, DataError> {
        if !guard(ticker)? {
            return Ok(Vec::new());
        }
        Ok(vec![InvestorTradingRow {
            date: day(),
            foreign: Some(30_000_000_000),
            institution: Some(-12_000_000_000),
            retail: Some(-18_000_000_000),
            ..Default::default()
        }])
    }

    async fn short_selling_by_date(
        &self,
        ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<ShortSellingRow>, DataError> {
        if !guard(ticker)? {
            return Ok(Vec::new());
        }
        Ok(vec![ShortSellingRow {
            date: day(),
            short_volume: Some(250),
            total_volume: Some(1_000),
            short_ratio: None,
        }])
    }

    async fn net_purchases_by_ticker(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
        _market: MarketSegment,
        _investor: InvestorCategory,
    ) -> Result<Vec<NetPurchaseRow>, DataError> {
        Ok(vec![NetPurchaseRow {
            ticker: KNOWN.to_string(),
            name: "삼성전자".to_string(),
            net_buy_volume: Some(1_000),
            net_buy_value: Some(-250_000_000),
        }])
    }

    async fn fundamentals_by_date(
        &self,
        ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<FundamentalRow>, DataError> {
        if !guard(ticker)? {
            return Ok(Vec::new());
        }
        Ok(vec![FundamentalRow {
            date: day(),
            per: Some(dec!(15.678)),
            pbr: Some(dec!(1.2)),
            eps: Some(dec!(4950.7)),
            bps: Some(dec!(60100)),
            dividend_yield: Some(dec!(1.9)),
            ..Default::default()
        }])
    }
}

fn service() -> SupplyService<FixtureProvider> {
    SupplyService::new(FixtureProvider, QueryConfig::default())
        .unwrap()
        .with_reference_date(day())
}

async fn query(command: &str, code: Option<&str>, stdin: &str) -> Value {
    let request = plan(Some(command), code).unwrap();
    execute(&service(), request, Cursor::new(stdin.to_string()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_investor_command() {
    let value = query("investor", Some(KNOWN), "").await;

    assert_eq!(
        value,
        json!({
            "foreignNet": 300,
            "institutionNet": -120,
            "retailNet": -180,
            "foreignNet5d": 300,
            "institutionNet5d": -120,
            "retailNet5d": -180,
            "dataDate": "2026-10-16"
        })
    );
}

#[tokio::test]
async fn test_short_command() {
    let value = query("SHORT", Some(KNOWN), "").await;

    assert_eq!(value["shortVolume"], json!(250));
    assert_eq!(value["shortRatio"], json!(25.0));
    assert_eq!(value["shortRatioAvg5d"], json!(0.0));
}

#[tokio::test]
async fn test_program_command() {
    let value = query("program", Some(KNOWN), "").await;
    assert_eq!(value, json!({"programBuy": 1000, "programNetBuy": -3}));

    let value = query("program", Some("000660"), "").await;
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_fundamental_command() {
    let value = query("fundamental", Some(KNOWN), "").await;

    assert_eq!(value["per"], json!(15.68));
    assert_eq!(value["eps"], json!(4950));
    assert_eq!(value["bps"], json!(60100));
    assert_eq!(value["div"], json!(1.9));
}

#[tokio::test]
async fn test_absent_prints_null() {
    let value = query("investor", Some("000660"), "").await;

    assert_eq!(value, Value::Null);
    assert_eq!(render(&value).unwrap(), "null");
}

#[tokio::test]
async fn test_failure_is_in_band() {
    let value = query("fundamental", Some(BROKEN), "").await;

    assert_eq!(
        value,
        json!({"error": "Fetch error: KRX responded with 500"})
    );
}

#[tokio::test]
async fn test_all_command() {
    let value = query("all", Some(KNOWN), "").await;
    let object = value.as_object().unwrap();

    assert_eq!(object["code"], json!(KNOWN));
    assert!(object["timestamp"].as_str().unwrap().ends_with("+09:00"));
    assert!(object.contains_key("investor"));
    assert!(object.contains_key("short"));
    assert!(object.contains_key("fundamental"));
    assert!(!object.contains_key("program"));
}

#[tokio::test]
async fn test_bulk_command() {
    let value = query("bulk", None, "005930\n\n999999\n  000660\n").await;
    let items = value.as_array().unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["code"], json!("005930"));
    assert_eq!(items[0].as_object().unwrap().len(), 5);
    assert_eq!(items[1]["code"], json!("999999"));
    assert_eq!(items[1].as_object().unwrap().len(), 2);
    assert!(items[1].get("error").is_none());
    assert_eq!(items[2]["code"], json!("000660"));
}

#[tokio::test]
async fn test_bulk_empty_input() {
    let value = query("bulk", None, "\n \n").await;
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn test_unknown_command() {
    let request = plan(Some("Quote"), Some(KNOWN)).unwrap();
    assert_eq!(request, Request::Unknown("quote".to_string()));

    let value = execute(&service(), request, Cursor::new(String::new()))
        .await
        .unwrap();
    assert_eq!(value, json!({"error": "Unknown command: quote"}));
}

#[tokio::test]
async fn test_snapshot_key_order() {
    let value = query("all", Some(KNOWN), "").await;
    let text = render(&value).unwrap();

    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["code", "timestamp", "investor", "short", "fundamental"]);

    let investor: Vec<&str> = value["investor"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(investor.first(), Some(&"foreignNet"));
    assert_eq!(investor.last(), Some(&"dataDate"));
    assert!(text.find("\"code\"").unwrap() < text.find("\"timestamp\"").unwrap());
}

fn empty_stdin() -> Cursor<String> {
    Cursor::new(String::new())
}

async fn invoke(command: Option<&str>, code: Option<&str>) -> flow_cli::Report {
    run(
        command,
        code,
        Ok(FixtureProvider),
        QueryConfig::default(),
        empty_stdin(),
    )
    .await
}

#[tokio::test]
async fn test_exit_missing_command() {
    let report = invoke(None, None).await;

    assert_eq!(report.status, Status::Failure);
    assert_eq!(
        report.value,
        json!({"error": "Usage: krx-flow <investor|short|program|fundamental|all|bulk> [code]"})
    );
}

#[tokio::test]
async fn test_exit_missing_code() {
    let report = invoke(Some("investor"), None).await;

    assert_eq!(report.status, Status::Failure);
    assert_eq!(report.value, json!({"error": "Stock code required"}));
}

#[tokio::test]
async fn test_exit_unknown_command_is_success() {
    let report = invoke(Some("quote"), Some(KNOWN)).await;

    assert_eq!(report.status, Status::Success);
    assert_eq!(report.value, json!({"error": "Unknown command: quote"}));
}

#[tokio::test]
async fn test_exit_in_band_failure_is_success() {
    let report = invoke(Some("short"), Some(BROKEN)).await;

    assert_eq!(report.status, Status::Success);
    assert_eq!(
        report.value,
        json!({"error": "Fetch error: KRX responded with 500"})
    );
}

#[tokio::test]
async fn test_exit_provider_unavailable() {
    // 데이터 소스가 없으면 명령 검사보다 먼저 실패
    let provider: Result<FixtureProvider, FlowError> =
        Err(FlowError::Unavailable("HTTP client build failed".to_string()));
    let report = run(None, None, provider, QueryConfig::default(), empty_stdin()).await;

    assert_eq!(report.status, Status::Failure);
    assert_eq!(
        report.value,
        json!({"error": "Data source unavailable: HTTP client build failed"})
    );
}

#[tokio::test]
async fn test_exit_invalid_timezone() {
    let config = QueryConfig {
        timezone: "Nowhere/Special".to_string(),
        ..Default::default()
    };
    let report = run(Some("all"), Some(KNOWN), Ok(FixtureProvider), config, empty_stdin()).await;

    assert_eq!(report.status, Status::Failure);
    assert!(report.value["error"]
        .as_str()
        .unwrap()
        .starts_with("Configuration error"));
}

#[tokio::test]
async fn test_exit_bulk_success() {
    let report = run(
        Some("bulk"),
        None,
        Ok(FixtureProvider),
        QueryConfig::default(),
        Cursor::new("005930\n000660\n".to_string()),
    )
    .await;

    assert_eq!(report.status, Status::Success);
    assert_eq!(report.value.as_array().unwrap().len(), 2);
}
