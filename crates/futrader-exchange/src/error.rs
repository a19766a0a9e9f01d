//! 거래소 에러 타입.

use futrader_core::TraderError;
use thiserror::Error;

/// 거래소 관련 에러.
///
/// 모든 공개 작업은 내부에서 에러를 로그로 남긴 뒤 이 타입으로
/// 반환합니다. 별도의 대역 외 에러 채널은 없습니다.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 검증 에러 - 타입 테이블에 없는 상품/방향/주기/레버리지.
    /// 네트워크 호출 전에 감지됩니다.
    #[error("Validation error: {0}")]
    Validation(String),

    /// 전송 에러 - 요청 구성/직렬화 실패 또는 네트워크 수준 실패
    #[error("Network error: {0}")]
    Network(String),

    /// 프로토콜 에러 - 비정상 HTTP 상태 또는 브로커 에러 코드
    #[error("API error {code}: {message}")]
    Api {
        /// 브로커 에러 코드 (HTTP 상태 또는 본문 내 코드)
        code: String,
        /// 브로커 에러 메시지
        message: String,
    },

    /// 파싱 에러 - 응답 본문이 JSON이 아님
    #[error("Parse error: {0}")]
    Parse(String),

    /// 데이터 에러 - 응답에 기대한 필드/컬렉션이 없음
    #[error("Data error: {0}")]
    Data(String),
}

impl ExchangeError {
    /// 네트워크 호출 전에 거부된 검증 에러인지 확인합니다.
    pub fn is_validation(&self) -> bool {
        matches!(self, ExchangeError::Validation(_))
    }
}

impl From<ExchangeError> for TraderError {
    /// 프레임워크 에러 계층으로 승격합니다.
    fn from(err: ExchangeError) -> Self {
        TraderError::Exchange(err.to_string())
    }
}
