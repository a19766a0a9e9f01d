//! 캔들스틱 데이터를 위한 타임프레임 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 캔들스틱 타임프레임.
///
/// 프레임워크 주기 토큰(`"M"`, `"H4"`, ...)과 브로커 주기 문자열
/// (`"1min"`, `"4hour"`, ...) 사이의 변환 테이블입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 1분봉
    M1,
    /// 3분봉
    M3,
    /// 5분봉
    M5,
    /// 15분봉
    M15,
    /// 30분봉
    M30,
    /// 1시간봉
    H1,
    /// 2시간봉
    H2,
    /// 4시간봉
    H4,
    /// 6시간봉
    H6,
    /// 12시간봉
    H12,
    /// 일봉
    D1,
    /// 3일봉
    D3,
    /// 주봉
    W1,
}

impl Timeframe {
    /// 이 타임프레임의 기간을 반환합니다.
    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::M1 => Duration::from_secs(60),
            Timeframe::M3 => Duration::from_secs(3 * 60),
            Timeframe::M5 => Duration::from_secs(5 * 60),
            Timeframe::M15 => Duration::from_secs(15 * 60),
            Timeframe::M30 => Duration::from_secs(30 * 60),
            Timeframe::H1 => Duration::from_secs(60 * 60),
            Timeframe::H2 => Duration::from_secs(2 * 60 * 60),
            Timeframe::H4 => Duration::from_secs(4 * 60 * 60),
            Timeframe::H6 => Duration::from_secs(6 * 60 * 60),
            Timeframe::H12 => Duration::from_secs(12 * 60 * 60),
            Timeframe::D1 => Duration::from_secs(24 * 60 * 60),
            Timeframe::D3 => Duration::from_secs(3 * 24 * 60 * 60),
            Timeframe::W1 => Duration::from_secs(7 * 24 * 60 * 60),
        }
    }

    /// 이 타임프레임의 초 단위 값을 반환합니다.
    pub fn as_secs(&self) -> u64 {
        self.duration().as_secs()
    }

    /// 브로커 주기 문자열로 변환합니다.
    pub fn broker_period(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1min",
            Timeframe::M3 => "3min",
            Timeframe::M5 => "5min",
            Timeframe::M15 => "15min",
            Timeframe::M30 => "30min",
            Timeframe::H1 => "1hour",
            Timeframe::H2 => "2hour",
            Timeframe::H4 => "4hour",
            Timeframe::H6 => "6hour",
            Timeframe::H12 => "12hour",
            Timeframe::D1 => "1day",
            Timeframe::D3 => "3day",
            Timeframe::W1 => "1week",
        }
    }

    /// 프레임워크 주기 토큰을 반환합니다.
    pub fn token(&self) -> &'static str {
        match self {
            Timeframe::M1 => "M",
            Timeframe::M3 => "M3",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H",
            Timeframe::H2 => "H2",
            Timeframe::H4 => "H4",
            Timeframe::H6 => "H6",
            Timeframe::H12 => "H12",
            Timeframe::D1 => "D",
            Timeframe::D3 => "D3",
            Timeframe::W1 => "W",
        }
    }

    /// 프레임워크 주기 토큰에서 파싱합니다.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Timeframe::M1),
            "M3" => Some(Timeframe::M3),
            "M5" => Some(Timeframe::M5),
            "M15" => Some(Timeframe::M15),
            "M30" => Some(Timeframe::M30),
            "H" => Some(Timeframe::H1),
            "H2" => Some(Timeframe::H2),
            "H4" => Some(Timeframe::H4),
            "H6" => Some(Timeframe::H6),
            "H12" => Some(Timeframe::H12),
            "D" => Some(Timeframe::D1),
            "D3" => Some(Timeframe::D3),
            "W" => Some(Timeframe::W1),
            _ => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| format!("unrecognized timeframe: {}", s))
    }
}
