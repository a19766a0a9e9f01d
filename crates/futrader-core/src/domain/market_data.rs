//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 시장 데이터 관련 타입을 정의합니다:
//! - `Record` - OHLCV 캔들스틱 데이터
//! - `Ticker` / `DepthLevel` - 호가 스냅샷
//! - `Balance` - 계좌 잔고

use crate::types::{Price, Quantity};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLCV 캔들스틱 데이터.
///
/// 캐시된 시리즈 내에서 `time`은 중복 없이 오름차순으로 유지됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 캔들 시작 시간 (unix 초)
    pub time: i64,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량
    pub volume: Quantity,
}

impl Record {
    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}

/// 호가창 가격 레벨.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    /// 가격
    pub price: Price,
    /// 수량
    pub amount: Quantity,
}

/// 시장 호가 스냅샷.
///
/// `bids`는 가격 내림차순(최우선 매수 먼저), `asks`는 가격
/// 오름차순(최우선 매도 먼저)으로 정규화됩니다. 두 시퀀스가 모두
/// 비어 있지 않아야 구성에 성공합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    /// 최우선 매수 호가
    pub buy: Price,
    /// 최우선 매도 호가
    pub sell: Price,
    /// 중간 가격 (매수/매도 산술 평균)
    pub mid: Price,
    /// 매수 호가 레벨
    pub bids: Vec<DepthLevel>,
    /// 매도 호가 레벨
    pub asks: Vec<DepthLevel>,
    /// 스냅샷 타임스탬프
    pub timestamp: DateTime<Utc>,
}

impl Ticker {
    /// 매수/매도 스프레드를 반환합니다.
    pub fn spread(&self) -> Decimal {
        self.sell - self.buy
    }
}

/// 계좌 잔고.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    /// 계좌 기준 통화
    pub currency: String,
    /// 사용 가능한 잔고
    pub available: Decimal,
    /// 주문에 묶인 잔고
    pub frozen: Decimal,
}

impl Balance {
    /// 총 잔고 반환 (사용 가능 + 묶인 잔고).
    pub fn total(&self) -> Decimal {
        self.available + self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record() {
        let record = Record {
            time: 1_700_000_000,
            open: dec!(430),
            high: dec!(436),
            low: dec!(428),
            close: dec!(434),
            volume: dec!(1250),
        };

        assert!(record.is_bullish());
        assert_eq!(record.range(), dec!(8));
    }

    #[test]
    fn test_ticker_spread() {
        let ticker = Ticker {
            buy: dec!(100),
            sell: dec!(101),
            mid: dec!(100.5),
            bids: vec![DepthLevel { price: dec!(100), amount: dec!(1) }],
            asks: vec![DepthLevel { price: dec!(101), amount: dec!(1) }],
            timestamp: Utc::now(),
        };

        assert_eq!(ticker.spread(), dec!(1));
    }

    #[test]
    fn test_balance_total() {
        let balance = Balance {
            currency: "USD".to_string(),
            available: dec!(1000),
            frozen: dec!(50),
        };
        assert_eq!(balance.total(), dec!(1050));
    }
}
