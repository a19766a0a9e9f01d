//! JSON 스칼라 관용 변환.
//!
//! 브로커 응답은 같은 필드를 숫자로 줄 때도, 숫자 문자열로 줄 때도
//! 있습니다. 이 모듈은 `serde_json::Value`를 형식에 관계없이
//! Decimal/정수/문자열로 강제 변환합니다. 없는 필드나 변환 불가능한
//! 값은 0 또는 빈 문자열로 떨어집니다.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// 값을 Decimal로 강제 변환합니다.
pub fn as_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::String(s)) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                n.as_f64()
                    .and_then(Decimal::from_f64)
                    .unwrap_or(Decimal::ZERO)
            }
        }
        _ => Decimal::ZERO,
    }
}

/// 값을 i64로 강제 변환합니다.
///
/// 소수 값은 버림 처리됩니다.
pub fn as_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

/// 값을 문자열로 강제 변환합니다.
///
/// 브로커가 주문 ID를 숫자로 주는 경우에도 문자열로 통일합니다.
pub fn as_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_as_decimal() {
        assert_eq!(as_decimal(Some(&json!("430.19"))), dec!(430.19));
        assert_eq!(as_decimal(Some(&json!(430.19))), dec!(430.19));
        assert_eq!(as_decimal(Some(&json!(42))), dec!(42));
        assert_eq!(as_decimal(Some(&json!("not a number"))), Decimal::ZERO);
        assert_eq!(as_decimal(None), Decimal::ZERO);
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(as_i64(Some(&json!(3))), 3);
        assert_eq!(as_i64(Some(&json!("3"))), 3);
        assert_eq!(as_i64(Some(&json!(3.9))), 3);
        assert_eq!(as_i64(Some(&json!(null))), 0);
        assert_eq!(as_i64(None), 0);
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(Some(&json!("98765"))), "98765");
        assert_eq!(as_text(Some(&json!(98765))), "98765");
        assert_eq!(as_text(None), "");
    }
}
