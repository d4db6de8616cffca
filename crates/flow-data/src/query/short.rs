//! 공매도 현황 집계.

use crate::provider::ShortSellingRow;
use flow_core::units::{mean, round2, short_ratio};
use flow_core::ShortInterest;
use rust_decimal::Decimal;

/// 최근 N 거래일 행으로 공매도 레코드를 만듭니다.
///
/// 당일 비중은 소스 값을 우선 사용하고, 없으면 거래량으로 계산합니다.
/// 평균은 비중 값이 있는 행만 대상으로 하며 하나도 없으면 0입니다.
pub fn summarize(rows: &[ShortSellingRow]) -> Option<ShortInterest> {
    let latest = rows.last()?;
    let short_volume = latest.short_volume.unwrap_or(0);

    let ratio = match latest.short_ratio {
        Some(ratio) => round2(ratio),
        None => short_ratio(short_volume, latest.total_volume.unwrap_or(0)),
    };

    let reported: Vec<Decimal> = rows.iter().filter_map(|r| r.short_ratio).collect();

    Some(ShortInterest {
        short_volume,
        short_ratio: ratio,
        short_ratio_avg_5d: round2(mean(&reported)),
        data_date: latest.date,
    })
}
