//! 도메인 모델.
//!
//! 브로커 응답에서 구성되는 엔티티를 정의합니다:
//! - `Balance` - 계좌 잔고
//! - `Position` - 보유 포지션
//! - `Order` - 주문
//! - `Record` / `Ticker` - 시장 데이터

mod market_data;
mod order;
mod position;

pub use market_data::{Balance, DepthLevel, Record, Ticker};
pub use order::Order;
pub use position::Position;
