//! 조회 명령 실행.

use super::{Command, Request};
use crate::output::error_json;
use flow_core::{FlowError, FlowResult};
use flow_data::{MarketDataProvider, SupplyService};
use serde_json::Value;
use std::io::{self, BufRead};
use tracing::{debug, info};

/// stdin에서 종목 코드를 한 줄씩 읽습니다. 공백 줄은 건너뜁니다.
pub fn read_tickers<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut tickers = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let ticker = line.trim();
        if !ticker.is_empty() {
            tickers.push(ticker.to_string());
        }
    }
    Ok(tickers)
}

/// 요청을 실행하고 출력할 JSON 값을 반환합니다.
///
/// 조회 기간과 프로그램 매매 시장은 서비스 설정을 따릅니다.
/// `bulk`는 조회 전에 `input`을 끝까지 읽습니다.
pub async fn execute<P, R>(
    service: &SupplyService<P>,
    request: Request,
    input: R,
) -> FlowResult<Value>
where
    P: MarketDataProvider,
    R: BufRead,
{
    let days = service.config().trailing_days;

    let value = match request {
        Request::Bulk => {
            let tickers = read_tickers(input)
                .map_err(|e| FlowError::InvalidInput(format!("failed to read stdin: {}", e)))?;
            info!(count = tickers.len(), "일괄 조회 시작");
            serde_json::to_value(service.bulk(&tickers).await)?
        }
        Request::Single { command, code } => {
            debug!(command = %command, code = %code, "단일 조회");
            match command {
                Command::Investor => serde_json::to_value(service.investor(&code, days).await)?,
                Command::Short => serde_json::to_value(service.short(&code, days).await)?,
                Command::Program => serde_json::to_value(service.program(&code).await)?,
                Command::Fundamental => serde_json::to_value(service.fundamental(&code).await)?,
                Command::All => serde_json::to_value(service.snapshot(&code).await)?,
            }
        }
        Request::Unknown(name) => error_json(format!("Unknown command: {}", name)),
    };

    Ok(value)
}
