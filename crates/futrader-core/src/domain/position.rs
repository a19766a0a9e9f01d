//! 포지션 엔티티.

use crate::types::{Instrument, Price, Quantity, Tenor, TradeSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 보유 포지션.
///
/// 포지션 조회 때마다 브로커 스냅샷에서 새로 구성되며, 캐시되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// 평균 진입 가격
    pub price: Price,
    /// 레버리지 배율
    pub leverage: i64,
    /// 보유 수량
    pub amount: Quantity,
    /// 확정 수량
    pub confirm_amount: Quantity,
    /// 주문에 묶인 수량
    pub frozen_amount: Quantity,
    /// 미실현 손익
    pub profit: Decimal,
    /// 계약 만기 (브로커 스냅샷에 없으면 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenor: Option<Tenor>,
    /// 포지션 방향
    pub side: TradeSide,
    /// 거래 상품
    pub instrument: Instrument,
}

impl Position {
    /// 롱 포지션인지 확인합니다.
    pub fn is_long(&self) -> bool {
        self.side == TradeSide::Long
    }
}
