//! 거래소 trait 정의.

use async_trait::async_trait;
use futrader_core::{
    Balance, Instrument, Leverage, Order, Position, Price, Quantity, Record, Ticker,
};
use rust_decimal::Decimal;

use crate::ExchangeError;

/// 거래소 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// 주문 요청.
///
/// 방향과 상품은 프레임워크 어휘의 문자열 토큰으로 전달되며 주문 전에
/// 타입 테이블로 검증됩니다. 레버리지는 닫힌 열거형이므로 허용되지
/// 않는 배율은 요청 자체를 만들 수 없습니다.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    /// 거래 방향 토큰 (예: "LONG", "SHORT_CLOSE")
    pub side: String,
    /// 상품 토큰 (예: "BTC.WEEK/USD")
    pub instrument: String,
    /// 주문 가격 - 0 이하면 시장가 주문
    pub price: Price,
    /// 주문 수량
    pub amount: Quantity,
    /// 레버리지 배율
    pub leverage: Leverage,
    /// 거래 저널에 남길 자유 형식 주석
    pub tags: Vec<String>,
}

impl TradeRequest {
    /// 새 주문 요청을 생성합니다.
    pub fn new(
        side: impl Into<String>,
        instrument: impl Into<String>,
        price: Price,
        amount: Quantity,
        leverage: Leverage,
    ) -> Self {
        Self {
            side: side.into(),
            instrument: instrument.into(),
            price,
            amount,
            leverage,
            tags: Vec::new(),
        }
    }

    /// 저널 주석을 추가합니다.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// 통합 거래소 인터페이스.
///
/// 전략 엔진이 브로커 구현과 무관하게 사용하는 공통 능력 집합입니다.
/// 모든 네트워크 작업은 호출 스레드를 왕복 시간 동안 블로킹하며,
/// 인스턴스 상태(호출 카운터, 캔들 캐시)는 `&mut self`로만 변경되므로
/// 호출은 인스턴스 단위로 직렬화됩니다. 재시도는 하지 않습니다 -
/// 모든 실패는 한 번만 보고됩니다.
#[async_trait]
pub trait Exchange {
    /// 거래소 표시 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 거래소 유형 태그를 반환합니다.
    fn exchange_type(&self) -> &str;

    /// 상품의 최소 주문 수량을 반환합니다.
    fn min_amount(&self, instrument: Instrument) -> Decimal;

    /// 초당 호출 한도를 설정하고 적용된 값을 반환합니다.
    fn set_limit(&mut self, calls_per_second: f64) -> f64;

    /// 누적 호출 수에 맞춰 필요한 만큼 대기합니다.
    ///
    /// 호출 묶음 사이에서 소비자가 직접 호출합니다.
    async fn auto_sleep(&mut self);

    /// 계좌 잔고를 조회합니다.
    async fn get_account(&mut self) -> ExchangeResult<Balance>;

    /// 상품의 보유 포지션을 조회합니다.
    ///
    /// 포지션이 없는 상태는 에러가 아니라 빈 목록입니다.
    async fn get_positions(&mut self, instrument: &str) -> ExchangeResult<Vec<Position>>;

    /// 주문을 접수하고 브로커 주문 ID를 반환합니다.
    async fn trade(&mut self, request: TradeRequest) -> ExchangeResult<String>;

    /// 주문 하나의 상세를 조회합니다.
    async fn get_order(&mut self, instrument: &str, id: &str) -> ExchangeResult<Order>;

    /// 미체결 주문 목록을 조회합니다.
    async fn get_orders(&mut self, instrument: &str) -> ExchangeResult<Vec<Order>>;

    /// 최근 체결 주문 목록을 조회합니다.
    async fn get_trades(&mut self, instrument: &str) -> ExchangeResult<Vec<Order>>;

    /// 주문을 취소합니다.
    async fn cancel_order(&mut self, order: &Order) -> ExchangeResult<bool>;

    /// 호가 스냅샷을 조회합니다.
    ///
    /// `size`가 None이거나 0이면 기본 20 레벨을 요청합니다.
    async fn get_ticker(&mut self, instrument: &str, size: Option<usize>)
        -> ExchangeResult<Ticker>;

    /// 캔들스틱 시리즈를 조회합니다.
    ///
    /// 새로 받은 캔들을 내부 캐시에 병합한 뒤, 캐시된 전체 시리즈를
    /// (새 캔들만이 아니라) 반환합니다. `size`가 None이거나 0이면
    /// 기본 200개 윈도우를 사용합니다.
    async fn get_records(
        &mut self,
        instrument: &str,
        timeframe: &str,
        size: Option<usize>,
    ) -> ExchangeResult<Vec<Record>>;
}
