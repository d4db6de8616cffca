//! 데이터 소스가 반환하는 원천 행(row) 타입.
//!
//! 날짜별 테이블은 오래된 날짜부터 정렬되어 있습니다.
//! 원천에 없거나 `-`로 표기된 값은 `None`입니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 투자자별 순매수 거래대금 (원, 일별).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorTradingRow {
    /// 거래일
    pub date: NaiveDate,
    /// 기관합계
    pub institution: Option<i64>,
    /// 기타법인
    pub other_corporation: Option<i64>,
    /// 개인
    pub retail: Option<i64>,
    /// 외국인합계
    pub foreign: Option<i64>,
    /// 전체
    pub total: Option<i64>,
}

/// 공매도 거래 (일별).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortSellingRow {
    /// 거래일
    pub date: NaiveDate,
    /// 공매도 거래량 (주)
    pub short_volume: Option<i64>,
    /// 총 거래량 (주)
    pub total_volume: Option<i64>,
    /// 공매도 거래량 비중 (%)
    pub short_ratio: Option<Decimal>,
}

/// 시장 전체 종목별 순매수 (기간 합계).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPurchaseRow {
    /// 단축코드 (6자리)
    pub ticker: String,
    /// 종목명
    pub name: String,
    /// 순매수 거래량 (주)
    pub net_buy_volume: Option<i64>,
    /// 순매수 거래대금 (원)
    pub net_buy_value: Option<i64>,
}

/// PER/PBR/배당수익률 (일별).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundamentalRow {
    /// 거래일
    pub date: NaiveDate,
    /// 종가
    pub close: Option<Decimal>,
    /// EPS (주당순이익)
    pub eps: Option<Decimal>,
    /// PER (주가수익비율)
    pub per: Option<Decimal>,
    /// BPS (주당순자산)
    pub bps: Option<Decimal>,
    /// PBR (주가순자산비율)
    pub pbr: Option<Decimal>,
    /// DPS (주당배당금)
    pub dps: Option<Decimal>,
    /// 배당수익률 (%)
    pub dividend_yield: Option<Decimal>,
}
