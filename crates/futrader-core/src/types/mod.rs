//! 공통 타입 정의.
//!
//! 프레임워크 내부 어휘와 브로커 코드 사이의 변환 테이블을
//! 닫힌 열거형으로 정의합니다. 변환 로직은 match로 작성되어
//! 컴파일 타임에 누락 여부가 검사됩니다.

mod instrument;
mod leverage;
mod side;
mod tenor;
mod timeframe;

pub use instrument::Instrument;
pub use leverage::Leverage;
pub use side::TradeSide;
pub use tenor::Tenor;
pub use timeframe::Timeframe;

/// 가격 타입.
pub type Price = rust_decimal::Decimal;

/// 수량 타입.
pub type Quantity = rust_decimal::Decimal;
