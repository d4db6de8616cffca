//! KRX 수급 데이터 조회.
//!
//! 이 crate는 다음을 제공합니다:
//! - `MarketDataProvider`: 외부 시장 데이터 소스 추상화
//! - `KrxDataSource`: KRX 정보데이터시스템 클라이언트
//! - `SupplyService`: 투자자/공매도/프로그램/펀더멘털 조회 및 통합 조회

pub mod error;
pub mod provider;
pub mod query;

pub use error::{DataError, Result};
pub use provider::{
    FundamentalRow, InvestorTradingRow, KrxDataSource, MarketDataProvider, NetPurchaseRow,
    ShortSellingRow,
};
pub use query::SupplyService;
