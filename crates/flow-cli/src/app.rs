//! 한 번의 CLI 실행과 종료 상태 결정.

use crate::commands::{execute, plan};
use crate::output::error_json;
use flow_core::{FlowError, FlowResult, QueryConfig};
use flow_data::{MarketDataProvider, SupplyService};
use serde_json::Value;
use std::io::BufRead;
use std::process::ExitCode;
use tracing::warn;

/// 프로세스 종료 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// 출력할 JSON과 종료 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub value: Value,
    pub status: Status,
}

impl Report {
    fn success(value: Value) -> Self {
        Self {
            value,
            status: Status::Success,
        }
    }

    /// 에러 JSON. 치명적 에러만 비정상 종료합니다.
    fn failed(err: FlowError) -> Self {
        let status = if err.is_fatal() {
            Status::Failure
        } else {
            Status::Success
        };
        warn!(error = %err, ?status, "실행 실패");
        Self {
            value: error_json(err.to_string()),
            status,
        }
    }
}

/// 명령을 실행합니다.
///
/// 데이터 소스를 먼저 확인한 뒤 명령과 종목 코드를 검사합니다.
/// 조회 실패는 JSON 안에 담기며 종료 상태에 영향을 주지 않습니다.
pub async fn run<P, R>(
    command: Option<&str>,
    code: Option<&str>,
    provider: FlowResult<P>,
    query: QueryConfig,
    input: R,
) -> Report
where
    P: MarketDataProvider,
    R: BufRead,
{
    let provider = match provider {
        Ok(provider) => provider,
        Err(e) => return Report::failed(e),
    };

    let service = match SupplyService::new(provider, query) {
        Ok(service) => service,
        Err(e) => return Report::failed(e),
    };

    let request = match plan(command, code) {
        Ok(request) => request,
        Err(usage) => return Report::failed(FlowError::InvalidInput(usage.to_string())),
    };

    match execute(&service, request, input).await {
        Ok(value) => Report::success(value),
        Err(e) => Report::failed(e),
    }
}
