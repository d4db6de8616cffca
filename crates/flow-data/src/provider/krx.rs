//! KRX(한국거래소) 정보데이터시스템 데이터 소스.
//!
//! `data.krx.co.kr`의 JSON 엔드포인트에서 투자자별 거래실적, 공매도,
//! 종목별 순매수, PER/PBR/배당수익률을 조회합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use flow_core::KrxConfig;
//! use flow_data::provider::krx::KrxDataSource;
//!
//! let krx = KrxDataSource::new(&KrxConfig::default())?;
//! let rows = krx.investor_trading_by_date("005930", start, end).await?;
//! ```

use super::isin;
use super::types::{FundamentalRow, InvestorTradingRow, NetPurchaseRow, ShortSellingRow};
use super::MarketDataProvider;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use flow_core::{InvestorCategory, KrxConfig, MarketSegment};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, info};

/// JSON 엔드포인트 경로.
const JSON_PATH: &str = "/comm/bldAttendant/getJsonData.cmd";

/// 종목 검색 bld.
const BLD_FINDER: &str = "dbms/comm/finder/finder_stkisu";

/// 투자자별 거래실적 개별종목 일별추이 bld.
const BLD_INVESTOR_TRADING: &str = "dbms/MDC/STAT/standard/MDCSTAT02302";

/// 개별종목 공매도 거래 bld.
const BLD_SHORT_SELLING: &str = "dbms/MDC/STAT/srt/MDCSTAT30102";

/// 투자자별 순매수 상위종목 bld.
const BLD_NET_PURCHASES: &str = "dbms/MDC/STAT/standard/MDCSTAT02401";

/// 개별종목 PER/PBR/배당수익률 bld.
const BLD_FUNDAMENTAL: &str = "dbms/MDC/STAT/standard/MDCSTAT03502";

/// KRX 정보데이터시스템 응답 구조.
///
/// 참고: 정보데이터시스템은 "output" 키를, 종목 검색은 "block1" 키를 사용합니다.
#[derive(Debug, Deserialize)]
struct KrxApiResponse<T> {
    #[serde(default = "Vec::new")]
    output: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct FinderResponse {
    #[serde(default)]
    block1: Vec<FinderRecord>,
}

#[derive(Debug, Deserialize)]
struct FinderRecord {
    /// ISIN
    full_code: String,
    /// 단축코드
    short_code: String,
}

/// 투자자별 거래실적 레코드 (순매수 거래대금).
#[derive(Debug, Deserialize)]
struct InvestorTradingRecord {
    #[serde(rename = "TRD_DD")]
    trd_dd: Option<String>,
    #[serde(rename = "TRDVAL1", default)]
    institution: Option<String>,
    #[serde(rename = "TRDVAL2", default)]
    other_corporation: Option<String>,
    #[serde(rename = "TRDVAL3", default)]
    retail: Option<String>,
    #[serde(rename = "TRDVAL4", default)]
    foreign: Option<String>,
    #[serde(rename = "TRDVAL_TOT", default)]
    total: Option<String>,
}

/// 공매도 거래 레코드.
#[derive(Debug, Deserialize)]
struct ShortSellingRecord {
    #[serde(rename = "TRD_DD")]
    trd_dd: Option<String>,
    #[serde(rename = "CVSRTSELL_TRDVOL", default)]
    short_volume: Option<String>,
    #[serde(rename = "ACC_TRDVOL", default)]
    total_volume: Option<String>,
    #[serde(rename = "TRDVOL_WT", default)]
    short_ratio: Option<String>,
}

/// 종목별 순매수 레코드.
#[derive(Debug, Deserialize)]
struct NetPurchaseRecord {
    #[serde(rename = "ISU_SRT_CD")]
    ticker: String,
    #[serde(rename = "ISU_NM", default)]
    name: String,
    #[serde(rename = "NETBID_TRDVOL", default)]
    net_buy_volume: Option<String>,
    #[serde(rename = "NETBID_TRDVAL", default)]
    net_buy_value: Option<String>,
}

/// PER/PBR/배당수익률 레코드.
#[derive(Debug, Deserialize)]
struct FundamentalRecord {
    #[serde(rename = "TRD_DD")]
    trd_dd: Option<String>,
    #[serde(rename = "TDD_CLSPRC", default)]
    close: Option<String>,
    #[serde(rename = "EPS", default)]
    eps: Option<String>,
    #[serde(rename = "PER", default)]
    per: Option<String>,
    #[serde(rename = "BPS", default)]
    bps: Option<String>,
    #[serde(rename = "PBR", default)]
    pbr: Option<String>,
    #[serde(rename = "DPS", default)]
    dps: Option<String>,
    #[serde(rename = "DVD_YLD", default)]
    dividend_yield: Option<String>,
}

/// KRX 데이터 소스.
#[derive(Debug, Clone)]
pub struct KrxDataSource {
    client: reqwest::Client,
    base_url: String,
    referer: String,
}

impl KrxDataSource {
    /// 새로운 KRX 데이터 소스 생성.
    ///
    /// HTTP 클라이언트를 만들 수 없으면 `DataError::ConfigError`를 반환합니다.
    pub fn new(config: &KrxConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            referer: config.referer.clone(),
        })
    }

    /// bld 요청을 보내고 JSON 응답을 역직렬화합니다.
    async fn post_json<T: DeserializeOwned>(&self, bld: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, JSON_PATH);

        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        form.push(("bld", bld));
        form.extend_from_slice(params);

        debug!(bld = bld, url = %url, "KRX 요청");

        let response = self
            .client
            .post(&url)
            .header("Referer", &self.referer)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::FetchError(format!(
                "KRX responded with {} [{}]",
                status, bld
            )));
        }

        let text = response.text().await?;

        debug!(bld = bld, response_len = text.len(), "KRX 응답 수신");

        serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            DataError::ParseError(format!("invalid KRX payload [{}]: {} - {}", bld, e, preview))
        })
    }

    /// `output` 배열을 반환하는 bld 요청.
    async fn fetch_output<T: DeserializeOwned>(
        &self,
        bld: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let response: KrxApiResponse<T> = self.post_json(bld, params).await?;
        Ok(response.output)
    }

    /// 단축코드를 ISIN으로 변환.
    ///
    /// 종목 검색에서 단축코드가 정확히 일치하는 종목을 찾고,
    /// 없으면 보통주 규칙으로 계산한 ISIN을 사용합니다.
    pub async fn resolve_isin(&self, ticker: &str) -> Result<String> {
        let ticker = ticker.trim();
        if isin::is_isin(ticker) {
            return Ok(ticker.to_string());
        }

        let params = [
            ("locale", "ko_KR"),
            ("mktsel", "ALL"),
            ("typeNo", "0"),
            ("searchText", ticker),
        ];
        let response: FinderResponse = self.post_json(BLD_FINDER, &params).await?;

        if let Some(record) = response
            .block1
            .into_iter()
            .find(|r| r.short_code == ticker)
        {
            debug!(ticker = ticker, isin = %record.full_code, "ISIN 조회");
            return Ok(record.full_code);
        }

        isin::common_share_isin(ticker)
            .ok_or_else(|| DataError::InvalidData(format!("cannot derive ISIN for '{}'", ticker)))
    }
}

#[async_trait]
impl MarketDataProvider for KrxDataSource {
    fn name(&self) -> &str {
        "KRX"
    }

    async fn investor_trading_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<InvestorTradingRow>> {
        let isin = self.resolve_isin(ticker).await?;
        let (start, end) = (format_krx_date(start), format_krx_date(end));

        // 일별추이(2) / 거래대금(2) / 순매수(3)
        let params = [
            ("strtDd", start.as_str()),
            ("endDd", end.as_str()),
            ("isuCd", isin.as_str()),
            ("inqTpCd", "2"),
            ("trdVolVal", "2"),
            ("askBid", "3"),
        ];
        let records: Vec<InvestorTradingRecord> =
            self.fetch_output(BLD_INVESTOR_TRADING, &params).await?;

        let mut rows = records
            .into_iter()
            .map(|r| {
                Ok(InvestorTradingRow {
                    date: parse_krx_date(r.trd_dd.as_deref())?,
                    institution: parse_krx_int(r.institution.as_deref())?,
                    other_corporation: parse_krx_int(r.other_corporation.as_deref())?,
                    retail: parse_krx_int(r.retail.as_deref())?,
                    foreign: parse_krx_int(r.foreign.as_deref())?,
                    total: parse_krx_int(r.total.as_deref())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by_key(|r| r.date);

        info!(ticker = ticker, count = rows.len(), "투자자별 거래실적 조회 완료");
        Ok(rows)
    }

    async fn short_selling_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ShortSellingRow>> {
        let isin = self.resolve_isin(ticker).await?;
        let (start, end) = (format_krx_date(start), format_krx_date(end));

        let params = [
            ("strtDd", start.as_str()),
            ("endDd", end.as_str()),
            ("isuCd", isin.as_str()),
            ("share", "1"),
            ("money", "1"),
        ];
        let records: Vec<ShortSellingRecord> =
            self.fetch_output(BLD_SHORT_SELLING, &params).await?;

        let mut rows = records
            .into_iter()
            .map(|r| {
                Ok(ShortSellingRow {
                    date: parse_krx_date(r.trd_dd.as_deref())?,
                    short_volume: parse_krx_int(r.short_volume.as_deref())?,
                    total_volume: parse_krx_int(r.total_volume.as_deref())?,
                    short_ratio: parse_krx_decimal(r.short_ratio.as_deref())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by_key(|r| r.date);

        info!(ticker = ticker, count = rows.len(), "공매도 거래 조회 완료");
        Ok(rows)
    }

    async fn net_purchases_by_ticker(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        market: MarketSegment,
        investor: InvestorCategory,
    ) -> Result<Vec<NetPurchaseRow>> {
        let (start, end) = (format_krx_date(start), format_krx_date(end));

        let params = [
            ("strtDd", start.as_str()),
            ("endDd", end.as_str()),
            ("mktId", market.krx_id()),
            ("invstTpCd", investor.krx_code()),
            ("share", "1"),
            ("money", "1"),
        ];
        let records: Vec<NetPurchaseRecord> =
            self.fetch_output(BLD_NET_PURCHASES, &params).await?;

        let rows = records
            .into_iter()
            .map(|r| {
                Ok(NetPurchaseRow {
                    ticker: r.ticker.trim().to_string(),
                    name: r.name,
                    net_buy_volume: parse_krx_int(r.net_buy_volume.as_deref())?,
                    net_buy_value: parse_krx_int(r.net_buy_value.as_deref())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            market = %market,
            count = rows.len(),
            "종목별 순매수 조회 완료"
        );
        Ok(rows)
    }

    async fn fundamentals_by_date(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FundamentalRow>> {
        let isin = self.resolve_isin(ticker).await?;
        let (start, end) = (format_krx_date(start), format_krx_date(end));

        let params = [
            ("searchType", "2"),
            ("mktId", "ALL"),
            ("strtDd", start.as_str()),
            ("endDd", end.as_str()),
            ("isuCd", isin.as_str()),
        ];
        let records: Vec<FundamentalRecord> = self.fetch_output(BLD_FUNDAMENTAL, &params).await?;

        let mut rows = records
            .into_iter()
            .map(|r| {
                Ok(FundamentalRow {
                    date: parse_krx_date(r.trd_dd.as_deref())?,
                    close: parse_krx_decimal(r.close.as_deref())?,
                    eps: parse_krx_decimal(r.eps.as_deref())?,
                    per: parse_krx_decimal(r.per.as_deref())?,
                    bps: parse_krx_decimal(r.bps.as_deref())?,
                    pbr: parse_krx_decimal(r.pbr.as_deref())?,
                    dps: parse_krx_decimal(r.dps.as_deref())?,
                    dividend_yield: parse_krx_decimal(r.dividend_yield.as_deref())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by_key(|r| r.date);

        info!(ticker = ticker, count = rows.len(), "PER/PBR 조회 완료");
        Ok(rows)
    }
}

/// 요청 파라미터용 날짜 (YYYYMMDD).
fn format_krx_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// KRX 날짜 문자열 파싱 (YYYY/MM/DD 또는 YYYYMMDD).
fn parse_krx_date(s: Option<&str>) -> Result<NaiveDate> {
    let s = s
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DataError::ParseError("missing TRD_DD".to_string()))?;

    let format = if s.contains('/') { "%Y/%m/%d" } else { "%Y%m%d" };
    NaiveDate::parse_from_str(s, format)
        .map_err(|e| DataError::ParseError(format!("invalid date '{}': {}", s, e)))
}

/// KRX 숫자 문자열 파싱 (쉼표/퍼센트 제거). 빈 값과 `-`는 `None`.
fn parse_krx_decimal(s: Option<&str>) -> Result<Option<Decimal>> {
    let Some(raw) = s.map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() || raw == "-" {
        return Ok(None);
    }

    let cleaned = raw.replace([',', '%'], "");
    Decimal::from_str(&cleaned)
        .map(Some)
        .map_err(|e| DataError::ParseError(format!("invalid number '{}': {}", raw, e)))
}

/// KRX 정수 문자열 파싱. 소수점이 있으면 0 방향으로 버립니다.
fn parse_krx_int(s: Option<&str>) -> Result<Option<i64>> {
    match parse_krx_decimal(s)? {
        None => Ok(None),
        Some(value) => value
            .trunc()
            .to_i64()
            .map(Some)
            .ok_or_else(|| DataError::ParseError(format!("number out of range: {}", value))),
    }
}
