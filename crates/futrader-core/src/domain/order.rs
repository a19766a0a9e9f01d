//! 주문 엔티티.

use crate::types::{Instrument, Price, Quantity, TradeSide};
use serde::{Deserialize, Serialize};

/// 브로커에 접수된 주문.
///
/// 주문 조회 응답에서 호출마다 새로 구성되며, 반환 이후에는 불변입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 브로커가 부여한 주문 ID
    pub id: String,
    /// 주문 가격
    pub price: Price,
    /// 주문 수량
    pub amount: Quantity,
    /// 체결 수량
    pub deal_amount: Quantity,
    /// 수수료
    pub fee: Price,
    /// 거래 방향
    pub side: TradeSide,
    /// 거래 상품
    pub instrument: Instrument,
}

impl Order {
    /// 미체결 잔량을 반환합니다.
    pub fn remaining(&self) -> Quantity {
        self.amount - self.deal_amount
    }

    /// 전량 체결되었는지 확인합니다.
    pub fn is_filled(&self) -> bool {
        self.deal_amount >= self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_remaining() {
        let order = Order {
            id: "98765".to_string(),
            price: dec!(430.5),
            amount: dec!(3),
            deal_amount: dec!(1),
            fee: dec!(0.012),
            side: TradeSide::Long,
            instrument: Instrument::BtcWeek,
        };

        assert_eq!(order.remaining(), dec!(2));
        assert!(!order.is_filled());
    }
}
