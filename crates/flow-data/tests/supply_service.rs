//! SupplyService 통합 테스트 (스텁 Provider 사용).

use async_trait::async_trait;
use chrono::NaiveDate;
use flow_core::{InvestorCategory, MarketSegment, QueryConfig, QueryOutcome};
use flow_data::{
    DataError, FundamentalRow, InvestorTradingRow, MarketDataProvider, NetPurchaseRow,
    ShortSellingRow, SupplyService,
};
use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

/// 종목별 응답을 미리 지정하는 스텁.
#[derive(Default)]
struct StubProvider {
    investor: HashMap<String, Vec<InvestorTradingRow>>,
    short: HashMap<String, Vec<ShortSellingRow>>,
    fundamental: HashMap<String, Vec<FundamentalRow>>,
    net_purchases: Vec<NetPurchaseRow>,
    /// 호출 시 실패할 종목
    failing: Vec<String>,
    /// 요청된 (조회, 시작일, 종료일)
    calls: Mutex<Vec<(&'static str, NaiveDate, NaiveDate)>>,
    markets: Mutex<Vec<MarketSegment>>,
}

impl StubProvider {
    fn record(&self, query: &'static str, start: NaiveDate, end: NaiveDate) {
        self.calls.lock().unwrap().push((query, start, end));
    }

    fn check(&self, ticker: &str) -> Result<(), DataError> {
        if self.failing.iter().any(|t| t == ticker) {
            return Err(DataError::FetchError("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn investor_trading_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<InvestorTradingRow>, DataError> {
        self.record("investor", start, end);
        self.check(ticker)?;
        Ok(self.investor.get(ticker).cloned().unwrap_or_default())
    }

    async fn short_selling_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ShortSellingRow>, DataError> {
        self.record("short", start, end);
        self.check(ticker)?;
        Ok(self.short.get(ticker).cloned().unwrap_or_default())
    }

    async fn net_purchases_by_ticker(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        market: MarketSegment,
        _investor: InvestorCategory,
    ) -> Result<Vec<NetPurchaseRow>, DataError> {
        self.record("program", start, end);
        self.markets.lock().unwrap().push(market);
        Ok(self.net_purchases.clone())
    }

    async fn fundamentals_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FundamentalRow>, DataError> {
        self.record("fundamental", start, end);
        self.check(ticker)?;
        Ok(self.fundamental.get(ticker).cloned().unwrap_or_default())
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

fn investor_rows(foreign: &[i64]) -> Vec<InvestorTradingRow> {
    foreign
        .iter()
        .enumerate()
        .map(|(i, &value)| InvestorTradingRow {
            date: date(1 + i as u32),
            foreign: Some(value),
            institution: Some(0),
            retail: Some(0),
            ..Default::default()
        })
        .collect()
}

fn short_rows() -> Vec<ShortSellingRow> {
    vec![ShortSellingRow {
        date: date(16),
        short_volume: Some(500),
        total_volume: Some(10_000),
        short_ratio: None,
    }]
}

fn fundamental_rows() -> Vec<FundamentalRow> {
    vec![FundamentalRow {
        date: date(16),
        per: Some(dec!(12.5)),
        pbr: Some(dec!(1.1)),
        eps: Some(dec!(5000)),
        bps: Some(dec!(45000)),
        dividend_yield: Some(dec!(2.5)),
        ..Default::default()
    }]
}

fn service(provider: StubProvider) -> SupplyService<StubProvider> {
    SupplyService::new(provider, QueryConfig::default())
        .unwrap()
        .with_reference_date(date(16))
}

#[tokio::test]
async fn test_investor_trailing_window() {
    let mut provider = StubProvider::default();
    provider.investor.insert(
        "005930".to_string(),
        investor_rows(&[
            999_000_000_000,
            100_000_000_000,
            -50_000_000_000,
            0,
            20_000_000_000,
            30_000_000_000,
        ]),
    );
    let service = service(provider);

    let flow = service.investor("005930", 5).await.found().unwrap();
    assert_eq!(flow.foreign_net, 300);
    assert_eq!(flow.foreign_net_5d, 1000);
    assert_eq!(flow.data_date, date(6));

    // 5 거래일 + 10일 여유
    let calls = service.provider().calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("investor", date(1), date(16))]);
}

#[tokio::test]
async fn test_absent_when_no_rows() {
    let service = service(StubProvider::default());

    assert!(service.investor("005930", 5).await.is_absent());
    assert!(service.short("005930", 5).await.is_absent());
    assert!(service.program("005930").await.is_absent());
    assert!(service.fundamental("005930").await.is_absent());
}

#[tokio::test]
async fn test_zero_days_is_absent() {
    let mut provider = StubProvider::default();
    provider
        .investor
        .insert("005930".to_string(), investor_rows(&[100_000_000]));
    let service = service(provider);

    assert!(service.investor("005930", 0).await.is_absent());
}

#[tokio::test]
async fn test_failure_becomes_error_record() {
    let provider = StubProvider {
        failing: vec!["005930".to_string()],
        ..Default::default()
    };
    let service = service(provider);

    let outcome = service.short("005930", 5).await;
    assert_eq!(
        outcome.error(),
        Some("Fetch error: connection reset")
    );
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"error": "Fetch error: connection reset"})
    );

    let outcome = service.fundamental("005930").await;
    assert!(matches!(outcome, QueryOutcome::Failed(ref msg) if !msg.is_empty()));
}

#[tokio::test]
async fn test_program_lookup_and_window() {
    let provider = StubProvider {
        net_purchases: vec![NetPurchaseRow {
            ticker: "005930".to_string(),
            name: "삼성전자".to_string(),
            net_buy_volume: Some(120_000),
            net_buy_value: Some(9_000_000_000),
        }],
        ..Default::default()
    };
    let service = service(provider);

    let program = service.program("005930").await.found().unwrap();
    assert_eq!(program.program_buy, 120_000);
    assert_eq!(program.program_net_buy, 90);

    assert!(service
        .program_in("000660", MarketSegment::Kosdaq)
        .await
        .is_absent());

    let calls = service.provider().calls.lock().unwrap().clone();
    assert_eq!(calls[0], ("program", date(1), date(16)));
    let markets = service.provider().markets.lock().unwrap().clone();
    assert_eq!(markets, vec![MarketSegment::Kospi, MarketSegment::Kosdaq]);
}

#[tokio::test]
async fn test_fundamental_window() {
    let mut provider = StubProvider::default();
    provider
        .fundamental
        .insert("005930".to_string(), fundamental_rows());
    let service = service(provider);

    let fundamental = service.fundamental("005930").await.found().unwrap();
    assert_eq!(fundamental.eps, 5000);
    assert_eq!(
        serde_json::to_value(&fundamental).unwrap(),
        json!({
            "per": 12.5,
            "pbr": 1.1,
            "eps": 5000,
            "bps": 45000,
            "div": 2.5,
            "dataDate": "2026-10-16"
        })
    );

    let calls = service.provider().calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("fundamental", date(6), date(16))]);
}

#[tokio::test]
async fn test_snapshot_omits_missing_sections() {
    let mut provider = StubProvider::default();
    provider
        .short
        .insert("005930".to_string(), short_rows());
    provider
        .fundamental
        .insert("005930".to_string(), fundamental_rows());
    let service = service(provider);

    let snapshot = service.snapshot("005930").await;
    assert_eq!(snapshot.code, "005930");
    assert!(snapshot.investor.is_none());
    assert_eq!(snapshot.short.as_ref().unwrap().short_ratio, dec!(5));
    assert!(snapshot.fundamental.is_some());

    let value = serde_json::to_value(&snapshot).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.contains_key("timestamp"));
    assert!(!object.contains_key("investor"));
    assert!(!object.contains_key("error"));
    assert!(object["short"].get("error").is_none());

    // 프로그램 매매는 통합 조회 대상이 아님
    let calls = service.provider().calls.lock().unwrap().clone();
    let queries: Vec<&str> = calls.iter().map(|(q, _, _)| *q).collect();
    assert_eq!(queries, vec!["investor", "short", "fundamental"]);
}

#[tokio::test]
async fn test_snapshot_drops_failed_sections() {
    let mut provider = StubProvider {
        failing: vec!["000660".to_string()],
        ..Default::default()
    };
    provider
        .fundamental
        .insert("000660".to_string(), fundamental_rows());
    let service = service(provider);

    let snapshot = service.snapshot("000660").await;
    assert_eq!(snapshot.section_count(), 0);

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 2);
    assert!(value.get("fundamental").is_none());
}

#[tokio::test]
async fn test_bulk_preserves_order_and_skips_blanks() {
    let mut provider = StubProvider {
        failing: vec!["000660".to_string()],
        ..Default::default()
    };
    provider
        .fundamental
        .insert("005930".to_string(), fundamental_rows());
    provider
        .short
        .insert("035720".to_string(), short_rows());
    let service = service(provider);

    let snapshots = service
        .bulk(["005930", "", "  000660  ", "\t", "035720"])
        .await;

    let codes: Vec<&str> = snapshots.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["005930", "000660", "035720"]);

    assert!(snapshots[0].fundamental.is_some());
    assert!(snapshots[0].short.is_none());
    assert_eq!(snapshots[1].section_count(), 0);
    assert!(snapshots[2].short.is_some());
    assert!(snapshots[2].fundamental.is_none());
}

#[tokio::test]
async fn test_invalid_timezone_rejected() {
    let config = QueryConfig {
        timezone: "Nowhere/Special".to_string(),
        ..Default::default()
    };

    assert!(SupplyService::new(StubProvider::default(), config).is_err());
}
