//! 단위 변환.
//!
//! 거래대금은 원 단위로 수신되어 억원 단위 정수로 환산합니다.
//! 환산은 내림 나눗셈이므로 음수 금액은 더 작은 정수로 내려갑니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

/// 1억원.
pub const HUNDRED_MILLION: i64 = 100_000_000;

/// 원 단위 금액을 억원 단위로 환산 (내림).
pub fn to_hundred_million(won: i64) -> i64 {
    won.div_euclid(HUNDRED_MILLION)
}

/// 원 단위 금액 합계를 억원 단위로 환산 (내림).
pub fn sum_to_hundred_million(values: impl IntoIterator<Item = i64>) -> i64 {
    let total: i128 = values.into_iter().map(i128::from).sum();
    let converted = total.div_euclid(i128::from(HUNDRED_MILLION));
    i64::try_from(converted).unwrap_or(if converted < 0 { i64::MIN } else { i64::MAX })
}

/// 비율/배수를 소수점 2자리로 반올림.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// 공매도 비중(%) 계산: `short / max(total, 1) * 100`.
pub fn short_ratio(short_volume: i64, total_volume: i64) -> Decimal {
    let denominator = Decimal::from(total_volume.max(1));
    round2(Decimal::from(short_volume) / denominator * Decimal::ONE_HUNDRED)
}

/// 소수점 이하를 버리고 정수로 변환 (0 방향). 범위를 넘으면 i64 경계값으로 포화합니다.
pub fn truncate_to_i64(value: Decimal) -> i64 {
    value.trunc().to_i64().unwrap_or_else(|| {
        warn!(value = %value, "i64 범위 초과, 경계값으로 포화");
        if value.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// 평균 (값이 없으면 0).
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}
