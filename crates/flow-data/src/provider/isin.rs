//! 국제증권식별번호(ISIN) 유틸리티.
//!
//! KRX 종목별 엔드포인트는 단축코드(6자리)가 아닌 12자리 ISIN을 받습니다.
//! 보통주 ISIN은 `KR7` + 단축코드 + `00` + 체크디지트 형식입니다.

/// ISIN 길이.
pub const ISIN_LEN: usize = 12;

/// ISIN 본문(체크디지트 제외 11자리)의 체크디지트 계산.
///
/// 문자는 `A=10 .. Z=35`로 펼친 뒤 Luhn 알고리즘을 적용합니다.
pub fn check_digit(body: &str) -> Option<u32> {
    let mut digits = Vec::with_capacity(body.len() * 2);
    for c in body.chars() {
        let value = c.to_digit(36)?;
        if value >= 10 {
            digits.push(value / 10);
            digits.push(value % 10);
        } else {
            digits.push(value);
        }
    }

    if digits.is_empty() {
        return None;
    }

    // 체크디지트가 붙을 자리 기준으로 가장 오른쪽 숫자부터 2배
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    Some((10 - sum % 10) % 10)
}

/// 보통주 단축코드로 ISIN 생성.
pub fn common_share_isin(ticker: &str) -> Option<String> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.len() != 6 || !ticker.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let body = format!("KR7{}00", ticker);
    let digit = check_digit(&body)?;
    Some(format!("{}{}", body, digit))
}

/// 이미 ISIN 형식인지 확인.
pub fn is_isin(code: &str) -> bool {
    code.len() == ISIN_LEN
        && code.chars().take(2).all(|c| c.is_ascii_uppercase())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
        && check_digit(&code[..ISIN_LEN - 1])
            .and_then(|d| char::from_digit(d, 10))
            .is_some_and(|d| code.ends_with(d))
}
