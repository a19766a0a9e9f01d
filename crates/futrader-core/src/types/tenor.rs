//! 파생 상품 만기 구분.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 선물 계약 만기 (주물/차주물/분기물).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenor {
    /// 금주물
    Week,
    /// 차주물
    Week2,
    /// 분기물
    Month3,
}

impl Tenor {
    /// 브로커 계약 구분 문자열로 변환합니다.
    pub fn broker_code(&self) -> &'static str {
        match self {
            Tenor::Week => "this_week",
            Tenor::Week2 => "next_week",
            Tenor::Month3 => "quarter",
        }
    }

    /// 브로커 계약 구분 문자열에서 파싱합니다.
    ///
    /// 주문/체결 내역 디코딩에 사용합니다.
    pub fn from_broker_code(s: &str) -> Option<Self> {
        match s {
            "this_week" => Some(Tenor::Week),
            "next_week" => Some(Tenor::Week2),
            "quarter" => Some(Tenor::Month3),
            _ => None,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tenor::Week => "WEEK",
            Tenor::Week2 => "WEEK2",
            Tenor::Month3 => "MONTH3",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenor_round_trip() {
        for tenor in [Tenor::Week, Tenor::Week2, Tenor::Month3] {
            assert_eq!(Tenor::from_broker_code(tenor.broker_code()), Some(tenor));
        }
        assert_eq!(Tenor::from_broker_code("day"), None);
    }

    #[test]
    fn test_tenor_display() {
        assert_eq!(Tenor::Month3.to_string(), "MONTH3");
    }
}
