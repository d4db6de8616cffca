//! 단일 조회 결과 타입.
//!
//! 조회는 예외로 프로세스를 종료시키지 않습니다. 결과는 세 가지 중 하나입니다:
//! - `Found`: 레코드 (JSON 객체)
//! - `Absent`: 데이터 없음 (JSON `null`)
//! - `Failed`: 소스 호출 실패 (JSON `{"error": "..."}`)

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 단일 조회 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<T> {
    /// 조회 성공
    Found(T),
    /// 소스가 데이터를 반환하지 않음
    Absent,
    /// 소스 호출 실패 (에러 설명)
    Failed(String),
}

impl<T> QueryOutcome<T> {
    /// `Option`에서 결과를 생성합니다. `None`은 `Absent`가 됩니다.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Found(v),
            None => Self::Absent,
        }
    }

    /// 성공한 레코드만 꺼냅니다. `Absent`와 `Failed`는 모두 `None`입니다.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            Self::Absent | Self::Failed(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// 실패 메시지.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<Option<T>, E>> for QueryOutcome<T> {
    fn from(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(value) => Self::from_option(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for QueryOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(value) => value.serialize(serializer),
            Self::Absent => serializer.serialize_none(),
            Self::Failed(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}
