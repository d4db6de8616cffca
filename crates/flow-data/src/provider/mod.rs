//! 시장 데이터 Provider 모듈.
//!
//! ## KRX 정보데이터시스템
//! - `KrxDataSource`: `data.krx.co.kr` JSON 엔드포인트 클라이언트 (인증키 불필요)
//! - 투자자별 거래실적, 공매도 거래, 종목별 순매수, PER/PBR/배당수익률
//! - 단축코드 → ISIN 변환 (`isin`)

pub mod isin;
pub mod krx;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use flow_core::{InvestorCategory, MarketSegment};

pub use krx::KrxDataSource;
pub use types::{FundamentalRow, InvestorTradingRow, NetPurchaseRow, ShortSellingRow};

/// 시장 데이터 Provider trait.
///
/// 모든 조회는 `[start, end]` 달력일 구간을 받으며,
/// 날짜별 테이블은 오래된 날짜부터 정렬하여 반환합니다.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 종목의 투자자별 순매수 거래대금 (일별).
    async fn investor_trading_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<InvestorTradingRow>>;

    /// 종목의 공매도 거래 (일별).
    async fn short_selling_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ShortSellingRow>>;

    /// 시장 전체 종목별 순매수 (기간 합계).
    async fn net_purchases_by_ticker(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        market: MarketSegment,
        investor: InvestorCategory,
    ) -> Result<Vec<NetPurchaseRow>>;

    /// 종목의 PER/PBR/배당수익률 (일별).
    async fn fundamentals_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FundamentalRow>>;
}
