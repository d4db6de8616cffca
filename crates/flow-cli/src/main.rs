//! krx-flow: KRX 수급 데이터 조회 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 삼성전자 투자자별 매매동향 (최근 5 거래일)
//! krx-flow investor 005930
//!
//! # 코스닥 시장 프로그램 매매
//! krx-flow program 247540 --market KOSDAQ
//!
//! # 통합 조회 (투자자 + 공매도 + 펀더멘털)
//! krx-flow all 005930
//!
//! # 여러 종목 일괄 조회 (stdin)
//! printf "005930\n000660\n" | krx-flow bulk
//! ```

use clap::error::ErrorKind;
use clap::Parser;
use flow_cli::{error_json, render, run};
use flow_core::{init_logging, AppConfig, FlowError, LogConfig, MarketSegment};
use flow_data::KrxDataSource;
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "krx-flow")]
#[command(about = "KRX 수급 데이터 조회 - 투자자/공매도/프로그램/펀더멘털 JSON 출력", long_about = None)]
#[command(version)]
struct Cli {
    /// 명령 (investor, short, program, fundamental, all, bulk)
    command: Option<String>,

    /// 종목 코드 (예: 005930). bulk는 stdin에서 읽습니다
    code: Option<String>,

    /// 투자자/공매도 조회 거래일 수
    #[arg(short, long)]
    days: Option<u32>,

    /// 프로그램 매매 시장 (KOSPI, KOSDAQ, KONEX, ALL)
    #[arg(short, long)]
    market: Option<MarketSegment>,

    /// 설정 파일 (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 로그 레벨 필터 (예: debug, flow_data=trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let rendered = e.to_string();
            let message = first_line(&rendered);
            emit(&error_json(message.strip_prefix("error: ").unwrap_or(message)));
            return ExitCode::FAILURE;
        }
    };

    let config = match prepare(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("krx-flow failed: {:#}", e);
            emit(&error_json(e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let provider = KrxDataSource::new(&config.krx).map_err(FlowError::from);
    let report = run(
        cli.command.as_deref(),
        cli.code.as_deref(),
        provider,
        config.query,
        io::stdin().lock(),
    )
    .await;
    debug!(status = ?report.status, "실행 완료");

    emit(&report.value);
    report.status.into()
}

/// 설정을 읽고 명령행 옵션을 반영한 뒤 로깅을 초기화합니다.
fn prepare(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    if let Some(days) = cli.days {
        config.query.trailing_days = days;
    }
    if let Some(market) = cli.market {
        config.query.program_market = market;
    }

    let mut log_config = LogConfig::from(&config.logging);
    if let Some(level) = &cli.log_level {
        log_config.level = level.clone();
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!("logging init failed: {}", e))?;

    Ok(config)
}

/// JSON 값을 stdout에 출력합니다.
fn emit(value: &Value) {
    match render(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

fn first_line(message: &str) -> &str {
    message
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or(message)
}
