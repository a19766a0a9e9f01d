//! 거래소 연결 및 시장 데이터 처리.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Exchange trait: 통합 거래소 인터페이스
//! - OandaV20 커넥터 (REST)
//! - 호출 속도 제한 (협조적 pacing)
//! - 캔들스틱 증분 캐시
//! - JSON 스칼라 관용 변환

pub mod connector;
pub mod convert;
pub mod error;
pub mod pacer;
pub mod records;
pub mod traits;

pub use connector::OandaV20Client;
pub use error::ExchangeError;
pub use pacer::Pacer;
pub use records::RecordCache;
pub use traits::{Exchange, ExchangeResult, TradeRequest};
