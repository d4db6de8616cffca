//! krx-flow CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 명령어 해석 (`investor`, `short`, `program`, `fundamental`, `all`, `bulk`)
//! - 조회 실행 및 stdin 종목 목록 읽기
//! - JSON 출력 및 종료 상태 결정

pub mod app;
pub mod commands;
pub mod output;

pub use app::{run, Report, Status};
pub use commands::{execute, plan, read_tickers, Command, Request, UsageError};
pub use output::{error_json, render};
