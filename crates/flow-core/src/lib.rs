//! # Flow Core
//!
//! KRX 수급 데이터 조회의 핵심 타입을 제공합니다.
//!
//! - 투자자 매매동향 / 공매도 / 프로그램 매매 / 펀더멘털 레코드
//! - 조회 결과 타입 (`QueryOutcome`)
//! - 단위 변환 (억원 환산, 비율 반올림)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod units;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
