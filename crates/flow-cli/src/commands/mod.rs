//! CLI 명령어 해석 및 실행.

mod query;

pub use query::{execute, read_tickers};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 단일 종목 조회 명령.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 투자자별 매매동향
    Investor,
    /// 공매도 현황
    Short,
    /// 프로그램 매매
    Program,
    /// 펀더멘털 지표
    Fundamental,
    /// 투자자 + 공매도 + 펀더멘털 통합
    All,
}

impl Command {
    pub const NAMES: [&'static str; 5] = ["investor", "short", "program", "fundamental", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investor => "investor",
            Self::Short => "short",
            Self::Program => "program",
            Self::Fundamental => "fundamental",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "investor" => Ok(Self::Investor),
            "short" => Ok(Self::Short),
            "program" => Ok(Self::Program),
            "fundamental" => Ok(Self::Fundamental),
            "all" => Ok(Self::All),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

/// 잘못된 호출. 에러 JSON 출력 후 비정상 종료합니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Usage: krx-flow <investor|short|program|fundamental|all|bulk> [code]")]
    MissingCommand,

    #[error("Stock code required")]
    MissingCode,
}

/// stdin 종목 목록 조회 명령.
pub const BULK: &str = "bulk";

/// 해석된 실행 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// 단일 종목 조회
    Single { command: Command, code: String },
    /// stdin 종목 목록 조회
    Bulk,
    /// 알 수 없는 명령 (에러 JSON 출력 후 정상 종료)
    Unknown(String),
}

/// 명령과 종목 코드를 실행 요청으로 해석합니다.
///
/// `bulk`는 종목 코드를 받지 않습니다. 알 수 없는 명령도 종목 코드가 없으면
/// `MissingCode`입니다.
pub fn plan(command: Option<&str>, code: Option<&str>) -> Result<Request, UsageError> {
    let name = command
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(UsageError::MissingCommand)?;

    if name.eq_ignore_ascii_case(BULK) {
        return Ok(Request::Bulk);
    }

    let code = code
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(UsageError::MissingCode)?;

    match name.parse::<Command>() {
        Ok(command) => Ok(Request::Single {
            command,
            code: code.to_string(),
        }),
        Err(_) => Ok(Request::Unknown(name.to_lowercase())),
    }
}
