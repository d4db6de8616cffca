//! 펀더멘털 지표 조회.

use crate::provider::FundamentalRow;
use flow_core::units::{round2, truncate_to_i64};
use flow_core::Fundamental;

/// 가장 최근 행의 PER/PBR/EPS/BPS/배당수익률.
///
/// 비율은 소수점 2자리로 반올림하고 EPS/BPS는 정수로 버립니다.
pub fn latest(rows: &[FundamentalRow]) -> Option<Fundamental> {
    let row = rows.last()?;

    Some(Fundamental {
        per: round2(row.per.unwrap_or_default()),
        pbr: round2(row.pbr.unwrap_or_default()),
        eps: truncate_to_i64(row.eps.unwrap_or_default()),
        bps: truncate_to_i64(row.bps.unwrap_or_default()),
        dividend_yield: round2(row.dividend_yield.unwrap_or_default()),
        data_date: row.date,
    })
}
