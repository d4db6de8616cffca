//! 데이터 모듈 오류 타입.

use flow_core::FlowError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (네트워크, HTTP 상태)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::FetchError(format!("request timed out: {}", err))
        } else if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<DataError> for FlowError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::ConfigError(msg) => FlowError::Unavailable(msg),
            other => FlowError::Data(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
