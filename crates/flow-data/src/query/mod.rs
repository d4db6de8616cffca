//! 수급 조회 서비스.
//!
//! 각 조회는 데이터 소스를 한 번 호출해 최근 행을 레코드로 변환합니다.
//! 소스 호출 실패는 `QueryOutcome::Failed`로, 빈 결과는 `QueryOutcome::Absent`로
//! 돌려주며 호출자에게 에러를 전파하지 않습니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let service = SupplyService::new(KrxDataSource::new(&config.krx)?, config.query)?;
//! let snapshot = service.snapshot("005930").await;
//! ```

pub mod fundamental;
pub mod investor;
pub mod program;
pub mod short;

use crate::error::Result;
use crate::provider::MarketDataProvider;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use chrono_tz::Tz;
use flow_core::{
    FlowResult, Fundamental, InvestorFlow, MarketSegment, ProgramTrading, QueryConfig,
    QueryOutcome, ShortInterest, StockSnapshot,
};
use tracing::{debug, info, instrument, warn};

/// 종목 수급 조회 서비스.
pub struct SupplyService<P> {
    provider: P,
    config: QueryConfig,
    tz: Tz,
    /// 고정 기준일 (없으면 현재 날짜)
    reference_date: Option<NaiveDate>,
}

impl<P: MarketDataProvider> SupplyService<P> {
    /// 새 서비스 생성. 설정된 시간대가 잘못되면 실패합니다.
    pub fn new(provider: P, config: QueryConfig) -> FlowResult<Self> {
        let tz = config.tz()?;
        Ok(Self {
            provider,
            config,
            tz,
            reference_date: None,
        })
    }

    /// 조회 구간의 종료일을 고정합니다.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// 설정된 시간대의 현재 시각.
    pub fn now(&self) -> DateTime<FixedOffset> {
        let local = Utc::now().with_timezone(&self.tz);
        local.with_timezone(&local.offset().fix())
    }

    /// 조회 기준일.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| self.now().date_naive())
    }

    /// 기준일로부터 `lookback_days` 달력일 이전까지의 구간.
    fn window(&self, lookback_days: u32) -> (NaiveDate, NaiveDate) {
        let end = self.today();
        let start = end
            .checked_sub_signed(Duration::days(i64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }

    /// 투자자별 매매동향 (최근 `days` 거래일).
    #[instrument(skip(self))]
    pub async fn investor(&self, ticker: &str, days: u32) -> QueryOutcome<InvestorFlow> {
        let (start, end) = self.window(days.saturating_add(self.config.window_padding_days));

        let result = self
            .provider
            .investor_trading_by_date(ticker, start, end)
            .await
            .map(|rows| investor::summarize(trailing(&rows, days)));

        self.settle("investor", ticker, result)
    }

    /// 공매도 현황 (최근 `days` 거래일).
    #[instrument(skip(self))]
    pub async fn short(&self, ticker: &str, days: u32) -> QueryOutcome<ShortInterest> {
        let (start, end) = self.window(days.saturating_add(self.config.window_padding_days));

        let result = self
            .provider
            .short_selling_by_date(ticker, start, end)
            .await
            .map(|rows| short::summarize(trailing(&rows, days)));

        self.settle("short", ticker, result)
    }

    /// 프로그램 매매 (설정된 시장).
    pub async fn program(&self, ticker: &str) -> QueryOutcome<ProgramTrading> {
        self.program_in(ticker, self.config.program_market).await
    }

    /// 지정한 시장의 순매수 테이블에서 프로그램 매매를 조회합니다.
    #[instrument(skip(self))]
    pub async fn program_in(
        &self,
        ticker: &str,
        market: MarketSegment,
    ) -> QueryOutcome<ProgramTrading> {
        let (start, end) = self.window(self.config.program_lookback_days);

        let result = self
            .provider
            .net_purchases_by_ticker(start, end, market, self.config.program_investor)
            .await
            .map(|rows| program::lookup(&rows, ticker));

        self.settle("program", ticker, result)
    }

    /// 최근 펀더멘털 지표.
    #[instrument(skip(self))]
    pub async fn fundamental(&self, ticker: &str) -> QueryOutcome<Fundamental> {
        let (start, end) = self.window(self.config.fundamental_lookback_days);

        let result = self
            .provider
            .fundamentals_by_date(ticker, start, end)
            .await
            .map(|rows| fundamental::latest(&rows));

        self.settle("fundamental", ticker, result)
    }

    /// 투자자/공매도/펀더멘털 통합 조회.
    ///
    /// 생성 시각은 조회 전에 기록합니다. 실패하거나 비어 있는 항목은 생략됩니다.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, ticker: &str) -> StockSnapshot {
        let mut snapshot = StockSnapshot::new(ticker, self.now());
        let days = self.config.trailing_days;

        snapshot.investor = self.investor(ticker, days).await.found();
        snapshot.short = self.short(ticker, days).await.found();
        snapshot.fundamental = self.fundamental(ticker).await.found();

        debug!(ticker = ticker, sections = snapshot.section_count(), "통합 조회 완료");
        snapshot
    }

    /// 여러 종목을 입력 순서대로 통합 조회합니다. 빈 항목은 건너뜁니다.
    pub async fn bulk<I, S>(&self, tickers: I) -> Vec<StockSnapshot>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut snapshots = Vec::new();

        for ticker in tickers {
            let ticker = ticker.as_ref().trim();
            if ticker.is_empty() {
                continue;
            }
            snapshots.push(self.snapshot(ticker).await);
        }

        info!(count = snapshots.len(), "일괄 조회 완료");
        snapshots
    }

    /// 소스 호출 결과를 조회 결과로 변환합니다.
    fn settle<T>(&self, query: &str, ticker: &str, result: Result<Option<T>>) -> QueryOutcome<T> {
        match &result {
            Err(e) => warn!(
                provider = self.provider.name(),
                query = query,
                ticker = ticker,
                error = %e,
                "조회 실패"
            ),
            Ok(None) => debug!(query = query, ticker = ticker, "데이터 없음"),
            Ok(Some(_)) => {}
        }
        result.into()
    }
}

/// 마지막 `n`개 행.
fn trailing<T>(rows: &[T], n: u32) -> &[T] {
    let n = usize::try_from(n).unwrap_or(usize::MAX);
    &rows[rows.len().saturating_sub(n)..]
}
