//! 시장 구분 및 투자자 구분.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 시장 구분 (KRX `mktId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketSegment {
    /// 유가증권시장
    #[default]
    Kospi,
    /// 코스닥
    Kosdaq,
    /// 코넥스
    Konex,
    /// 전체
    All,
}

impl MarketSegment {
    /// KRX 정보데이터시스템의 `mktId` 값.
    pub fn krx_id(&self) -> &'static str {
        match self {
            Self::Kospi => "STK",
            Self::Kosdaq => "KSQ",
            Self::Konex => "KNX",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for MarketSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kospi => write!(f, "KOSPI"),
            Self::Kosdaq => write!(f, "KOSDAQ"),
            Self::Konex => write!(f, "KONEX"),
            Self::All => write!(f, "ALL"),
        }
    }
}

impl FromStr for MarketSegment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KOSPI" | "STK" | "코스피" | "유가증권" => Ok(Self::Kospi),
            "KOSDAQ" | "KSQ" | "코스닥" => Ok(Self::Kosdaq),
            "KONEX" | "KNX" | "코넥스" => Ok(Self::Konex),
            "ALL" | "전체" => Ok(Self::All),
            _ => Err(format!("Unknown market: {}", s)),
        }
    }
}

/// 투자자 구분 (KRX `invstTpCd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorCategory {
    /// 전체
    #[default]
    All,
    /// 기관합계
    Institution,
    /// 기타법인
    OtherCorporation,
    /// 개인
    Retail,
    /// 외국인
    Foreign,
}

impl InvestorCategory {
    /// KRX 정보데이터시스템의 `invstTpCd` 값.
    pub fn krx_code(&self) -> &'static str {
        match self {
            Self::All => "9999",
            Self::Institution => "7050",
            Self::OtherCorporation => "7100",
            Self::Retail => "8000",
            Self::Foreign => "9000",
        }
    }
}
