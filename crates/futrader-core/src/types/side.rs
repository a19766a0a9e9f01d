//! 거래 방향 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 선물 거래 방향.
///
/// 개시(롱/숏)와 청산(롱 청산/숏 청산)을 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    /// 롱 개시 (매수)
    Long,
    /// 숏 개시 (매도)
    Short,
    /// 롱 청산
    LongClose,
    /// 숏 청산
    ShortClose,
}

impl TradeSide {
    /// 브로커 주문 유형 코드로 변환합니다 (요청 방향).
    pub fn broker_code(&self) -> i64 {
        match self {
            TradeSide::Long => 1,
            TradeSide::Short => 2,
            TradeSide::LongClose => 3,
            TradeSide::ShortClose => 4,
        }
    }

    /// 브로커 주문 유형 코드에서 파싱합니다 (응답 방향).
    ///
    /// 주문/체결 내역의 `type` 필드 디코딩에 사용합니다.
    pub fn from_broker_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(TradeSide::Long),
            2 => Some(TradeSide::Short),
            3 => Some(TradeSide::LongClose),
            4 => Some(TradeSide::ShortClose),
            _ => None,
        }
    }

    /// 거래 저널에 기록할 태그를 반환합니다.
    pub fn journal_tag(&self) -> &'static str {
        match self {
            TradeSide::Long => "LONG",
            TradeSide::Short => "SHORT",
            TradeSide::LongClose => "LONG_CLOSE",
            TradeSide::ShortClose => "SHORT_CLOSE",
        }
    }

    /// 청산 방향인지 확인합니다.
    pub fn is_close(&self) -> bool {
        matches!(self, TradeSide::LongClose | TradeSide::ShortClose)
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.journal_tag())
    }
}

impl FromStr for TradeSide {
    type Err = String;

    /// 프레임워크 방향 토큰에서 파싱합니다 (대소문자 무시).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LONG" | "BUY" => Ok(TradeSide::Long),
            "SHORT" | "SELL" => Ok(TradeSide::Short),
            "LONG_CLOSE" | "LONGCLOSE" | "CLOSEBUY" => Ok(TradeSide::LongClose),
            "SHORT_CLOSE" | "SHORTCLOSE" | "CLOSESELL" => Ok(TradeSide::ShortClose),
            _ => Err(format!("unrecognized trade side: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broker_code_round_trip() {
        for side in [
            TradeSide::Long,
            TradeSide::Short,
            TradeSide::LongClose,
            TradeSide::ShortClose,
        ] {
            assert_eq!(TradeSide::from_broker_code(side.broker_code()), Some(side));
        }
        assert_eq!(TradeSide::from_broker_code(0), None);
        assert_eq!(TradeSide::from_broker_code(5), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("long".parse::<TradeSide>(), Ok(TradeSide::Long));
        assert_eq!("Short_Close".parse::<TradeSide>(), Ok(TradeSide::ShortClose));
        assert!("hedge".parse::<TradeSide>().is_err());
    }
}
