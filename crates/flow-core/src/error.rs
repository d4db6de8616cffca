//! 수급 조회 시스템의 에러 타입.

use thiserror::Error;

/// 핵심 에러.
///
/// 메시지는 JSON `{"error": ...}` 응답으로 그대로 노출되므로 영문으로 유지합니다.
#[derive(Debug, Error)]
pub enum FlowError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 잘못된 호출 (메시지를 그대로 출력)
    #[error("{0}")]
    InvalidInput(String),

    /// 데이터 소스 조회/파싱 에러
    #[error("Data error: {0}")]
    Data(String),

    /// 직렬화 에러
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 데이터 소스를 사용할 수 없음
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// 수급 조회 작업을 위한 Result 타입.
pub type FlowResult<T> = Result<T, FlowError>;

impl FlowError {
    /// 프로세스를 비정상 종료시켜야 하는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FlowError::Config(_) | FlowError::Unavailable(_) | FlowError::InvalidInput(_)
        )
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        FlowError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for FlowError {
    fn from(err: config::ConfigError) -> Self {
        FlowError::Config(err.to_string())
    }
}
