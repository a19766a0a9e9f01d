//! 레버리지 배율 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 브로커가 허용하는 레버리지 배율.
///
/// 닫힌 집합입니다. 이 외의 배율은 주문 전에 검증 에러로 거부됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leverage {
    /// 10배
    X10,
    /// 20배
    X20,
}

impl Leverage {
    /// 브로커 `lever_rate` 파라미터 값으로 변환합니다.
    pub fn broker_value(&self) -> &'static str {
        match self {
            Leverage::X10 => "10",
            Leverage::X20 => "20",
        }
    }

    /// 정수 배율에서 파싱합니다.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            10 => Some(Leverage::X10),
            20 => Some(Leverage::X20),
            _ => None,
        }
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.broker_value())
    }
}

impl FromStr for Leverage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "10" => Ok(Leverage::X10),
            "20" => Ok(Leverage::X20),
            _ => Err(format!("unrecognized leverage: {}", s)),
        }
    }
}
