//! JSON 출력.

use serde::Serialize;
use serde_json::{json, Value};

/// 2칸 들여쓰기 JSON 문자열. 한글 등 비ASCII 문자는 이스케이프하지 않습니다.
pub fn render<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// `{"error": message}` 객체.
pub fn error_json(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}
