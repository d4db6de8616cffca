//! 프로그램 매매 조회.

use crate::provider::NetPurchaseRow;
use flow_core::units::to_hundred_million;
use flow_core::ProgramTrading;

/// 시장 전체 순매수 테이블에서 종목을 찾습니다.
///
/// 순매수 거래대금은 억원 단위로 환산합니다.
pub fn lookup(rows: &[NetPurchaseRow], ticker: &str) -> Option<ProgramTrading> {
    let ticker = ticker.trim();
    let row = rows.iter().find(|r| r.ticker == ticker)?;

    Some(ProgramTrading {
        program_buy: row.net_buy_volume.unwrap_or(0),
        program_net_buy: to_hundred_million(row.net_buy_value.unwrap_or(0)),
    })
}
