//! 조회 결과 레코드.
//!
//! 필드명은 소비 프로세스와의 계약이므로 camelCase로 직렬화됩니다.
//! 금액은 억원 단위 정수, 비율은 소수점 2자리 실수입니다.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 투자자별 매매동향 (외국인/기관/개인).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorFlow {
    /// 외국인 당일 순매수 (억원)
    pub foreign_net: i64,
    /// 기관 당일 순매수 (억원)
    pub institution_net: i64,
    /// 개인 당일 순매수 (억원)
    pub retail_net: i64,
    /// 외국인 기간 합계 (억원)
    pub foreign_net_5d: i64,
    /// 기관 기간 합계 (억원)
    pub institution_net_5d: i64,
    /// 개인 기간 합계 (억원)
    pub retail_net_5d: i64,
    /// 기준일
    pub data_date: NaiveDate,
}

/// 공매도 현황.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortInterest {
    /// 공매도량 (주)
    pub short_volume: i64,
    /// 공매도 비중 (%)
    #[serde(with = "rust_decimal::serde::float")]
    pub short_ratio: Decimal,
    /// 기간 평균 공매도 비중 (%)
    #[serde(with = "rust_decimal::serde::float")]
    pub short_ratio_avg_5d: Decimal,
    /// 기준일
    pub data_date: NaiveDate,
}

/// 프로그램(순매수) 매매.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramTrading {
    /// 순매수 거래량 (주)
    pub program_buy: i64,
    /// 순매수 거래대금 (억원)
    pub program_net_buy: i64,
}

/// 기본 재무지표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamental {
    /// PER (주가수익비율)
    #[serde(with = "rust_decimal::serde::float")]
    pub per: Decimal,
    /// PBR (주가순자산비율)
    #[serde(with = "rust_decimal::serde::float")]
    pub pbr: Decimal,
    /// EPS (주당순이익)
    pub eps: i64,
    /// BPS (주당순자산)
    pub bps: i64,
    /// 배당수익률 (%)
    #[serde(rename = "div", with = "rust_decimal::serde::float")]
    pub dividend_yield: Decimal,
    /// 기준일
    pub data_date: NaiveDate,
}

/// 종목 통합 스냅샷.
///
/// 실패했거나 데이터가 없는 하위 조회는 키 자체가 생략됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// 종목 코드
    pub code: String,
    /// 생성 시각
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investor: Option<InvestorFlow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<ShortInterest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fundamental: Option<Fundamental>,
}

impl StockSnapshot {
    /// 하위 조회 결과 없이 스냅샷을 생성합니다.
    pub fn new(code: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            code: code.into(),
            timestamp,
            investor: None,
            short: None,
            fundamental: None,
        }
    }

    /// 포함된 하위 레코드 수.
    pub fn section_count(&self) -> usize {
        [
            self.investor.is_some(),
            self.short.is_some(),
            self.fundamental.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
