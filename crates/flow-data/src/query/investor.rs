//! 투자자별 매매동향 집계.

use crate::provider::InvestorTradingRow;
use flow_core::units::{sum_to_hundred_million, to_hundred_million};
use flow_core::InvestorFlow;

/// 최근 N 거래일 행으로 매매동향 레코드를 만듭니다.
///
/// 당일 값은 마지막 행, 누적 값은 전체 행의 합계이며 모두 억원 단위입니다.
/// 행이 없으면 `None`.
pub fn summarize(rows: &[InvestorTradingRow]) -> Option<InvestorFlow> {
    let latest = rows.last()?;

    let total = |f: fn(&InvestorTradingRow) -> Option<i64>| {
        sum_to_hundred_million(rows.iter().map(|r| f(r).unwrap_or(0)))
    };

    Some(InvestorFlow {
        foreign_net: to_hundred_million(latest.foreign.unwrap_or(0)),
        institution_net: to_hundred_million(latest.institution.unwrap_or(0)),
        retail_net: to_hundred_million(latest.retail.unwrap_or(0)),
        foreign_net_5d: total(|r| r.foreign),
        institution_net_5d: total(|r| r.institution),
        retail_net_5d: total(|r| r.retail),
        data_date: latest.date,
    })
}
