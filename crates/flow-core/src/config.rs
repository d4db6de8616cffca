//! 설정 관리.
//!
//! 기본값 → `config/default.toml` (있을 경우) → `--config` 파일 →
//! 환경 변수(`KRX_FLOW__SECTION__KEY`) 순으로 덮어씁니다.

use crate::domain::{InvestorCategory, MarketSegment};
use crate::error::{FlowError, FlowResult};
use crate::logging::{LogConfig, LogFormat};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "KRX_FLOW";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// KRX 정보데이터시스템 접속 설정
    pub krx: KrxConfig,
    /// 조회 기간 설정
    pub query: QueryConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// KRX 정보데이터시스템 접속 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KrxConfig {
    /// 기본 URL
    pub base_url: String,
    /// User-Agent 헤더
    pub user_agent: String,
    /// Referer 헤더
    pub referer: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for KrxConfig {
    fn default() -> Self {
        Self {
            base_url: "http://data.krx.co.kr".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            referer: "http://data.krx.co.kr/contents/MDC/MDI/mdiLoader".to_string(),
            timeout_secs: 30,
        }
    }
}

impl KrxConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 조회 기간 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    /// 투자자/공매도 조회에 사용할 최근 거래일 수
    pub trailing_days: u32,
    /// 휴장일을 감안해 조회 시작일에 더하는 달력일 수
    pub window_padding_days: u32,
    /// 프로그램 매매 조회 기간 (달력일)
    pub program_lookback_days: u32,
    /// 펀더멘털 조회 기간 (달력일)
    pub fundamental_lookback_days: u32,
    /// 프로그램 매매 조회 시장
    pub program_market: MarketSegment,
    /// 프로그램 매매 조회 투자자 구분
    pub program_investor: InvestorCategory,
    /// 기준일/생성 시각 계산에 사용할 시간대
    pub timezone: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            trailing_days: 5,
            window_padding_days: 10,
            program_lookback_days: 15,
            fundamental_lookback_days: 10,
            program_market: MarketSegment::Kospi,
            program_investor: InvestorCategory::All,
            timezone: "Asia/Seoul".to_string(),
        }
    }
}

impl QueryConfig {
    /// 설정된 시간대를 파싱합니다.
    pub fn tz(&self) -> FlowResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| FlowError::Config(format!("invalid timezone '{}': {}", self.timezone, e)))
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        LogConfig::new(config.level.clone()).with_format(config.format)
    }
}

impl AppConfig {
    /// 기본 파일, 지정 파일, 환경 변수에서 설정을 로드합니다.
    ///
    /// `.env` 파일이 있으면 먼저 환경 변수로 읽어들입니다.
    pub fn load(path: Option<&Path>) -> FlowResult<Self> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// 값의 유효성을 검사합니다.
    pub fn validate(&self) -> FlowResult<()> {
        if self.krx.base_url.trim().is_empty() {
            return Err(FlowError::Config("krx.base_url must not be empty".to_string()));
        }
        self.query.tz()?;
        Ok(())
    }
}
