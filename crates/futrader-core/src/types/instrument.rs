//! 거래 상품 정의.

use crate::types::Tenor;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 이 브로커에서 거래 가능한 선물 상품.
///
/// 프레임워크 상품 토큰(예: `"BTC.WEEK/USD"`)과 브로커의
/// (심볼, 만기) 쌍 사이의 변환 테이블입니다. 테이블에 없는
/// 토큰은 네트워크 호출 전에 검증 에러로 거부됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    /// BTC 금주물
    BtcWeek,
    /// BTC 차주물
    BtcWeek2,
    /// BTC 분기물
    BtcQuarter,
    /// LTC 금주물
    LtcWeek,
    /// LTC 차주물
    LtcWeek2,
    /// LTC 분기물
    LtcQuarter,
}

impl Instrument {
    /// 브로커 심볼로 변환합니다.
    pub fn broker_symbol(&self) -> &'static str {
        match self {
            Instrument::BtcWeek | Instrument::BtcWeek2 | Instrument::BtcQuarter => "btc_usd",
            Instrument::LtcWeek | Instrument::LtcWeek2 | Instrument::LtcQuarter => "ltc_usd",
        }
    }

    /// 계약 만기를 반환합니다.
    pub fn tenor(&self) -> Tenor {
        match self {
            Instrument::BtcWeek | Instrument::LtcWeek => Tenor::Week,
            Instrument::BtcWeek2 | Instrument::LtcWeek2 => Tenor::Week2,
            Instrument::BtcQuarter | Instrument::LtcQuarter => Tenor::Month3,
        }
    }

    /// 프레임워크 상품 토큰을 반환합니다.
    pub fn token(&self) -> &'static str {
        match self {
            Instrument::BtcWeek => "BTC.WEEK/USD",
            Instrument::BtcWeek2 => "BTC.WEEK2/USD",
            Instrument::BtcQuarter => "BTC.MONTH3/USD",
            Instrument::LtcWeek => "LTC.WEEK/USD",
            Instrument::LtcWeek2 => "LTC.WEEK2/USD",
            Instrument::LtcQuarter => "LTC.MONTH3/USD",
        }
    }

    /// 포지션 조회 경로 세그먼트를 반환합니다.
    ///
    /// 브로커 포지션 엔드포인트는 `/`를 `_`로 치환한 토큰을 받습니다.
    pub fn position_path(&self) -> String {
        self.token().replace('/', "_")
    }

    /// 기초 자산의 최소 주문 수량을 반환합니다.
    pub fn min_amount(&self) -> Decimal {
        match self {
            Instrument::BtcWeek | Instrument::BtcWeek2 | Instrument::BtcQuarter => dec!(0.01),
            Instrument::LtcWeek | Instrument::LtcWeek2 | Instrument::LtcQuarter => dec!(0.1),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Instrument {
    type Err = String;

    /// 프레임워크 상품 토큰에서 파싱합니다 (대소문자 무시).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BTC.WEEK/USD" => Ok(Instrument::BtcWeek),
            "BTC.WEEK2/USD" => Ok(Instrument::BtcWeek2),
            "BTC.MONTH3/USD" => Ok(Instrument::BtcQuarter),
            "LTC.WEEK/USD" => Ok(Instrument::LtcWeek),
            "LTC.WEEK2/USD" => Ok(Instrument::LtcWeek2),
            "LTC.MONTH3/USD" => Ok(Instrument::LtcQuarter),
            _ => Err(format!("unrecognized instrument: {}", s)),
        }
    }
}
