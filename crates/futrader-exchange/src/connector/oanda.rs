//! OandaV20 거래소 커넥터.
//!
//! 선물 REST API 구현. 계좌/포지션은 v3 경로, 주문/호가/캔들은
//! 쿼리 스트링 기반 레거시 경로를 사용합니다.

use crate::convert;
use crate::pacer::Pacer;
use crate::records::RecordCache;
use crate::traits::{Exchange, ExchangeResult, TradeRequest};
use crate::ExchangeError;
use async_trait::async_trait;
use chrono::Utc;
use futrader_core::{
    journal, Balance, DepthLevel, ExchangeOptions, Instrument, Order, Position, Record, Ticker,
    Timeframe, TradeSide,
};
use reqwest::{header, Client, Method};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, error};

/// 운영 API 호스트.
const DEFAULT_HOST: &str = "https://api-fxtrade.oanda.com";

/// 호가 조회 기본 레벨 수.
const DEFAULT_DEPTH_SIZE: usize = 20;

/// 캔들 조회 기본 윈도우 크기.
const DEFAULT_RECORD_WINDOW: usize = 200;

/// 포지션 없음을 뜻하는 브로커 에러 코드.
///
/// 포지션이 없는 것은 정상 상태이므로 에러가 아니라 빈 목록으로
/// 번역됩니다.
const NO_SUCH_POSITION: &str = "NO_SUCH_POSITION";

/// 작업 경계에서 에러를 로그로 남기고 그대로 반환합니다.
fn log_fail(op: &str, err: ExchangeError) -> ExchangeError {
    error!("{}() error, {}", op, err);
    err
}

/// OandaV20 거래소 클라이언트.
///
/// 호출 카운터와 캔들 캐시는 인스턴스 소유 상태이며 `&mut self`로만
/// 변경됩니다. 동시 호출이 필요하면 워커마다 인스턴스를 따로 만드는
/// 것이 프레임워크의 계약입니다.
pub struct OandaV20Client {
    options: ExchangeOptions,
    client: Client,
    host: String,
    pacer: Pacer,
    records: RecordCache,
}

impl OandaV20Client {
    /// 새 클라이언트를 생성합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::Network`를
    /// 반환합니다.
    pub fn new(options: ExchangeOptions) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ExchangeError::Network(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            options,
            client,
            host: DEFAULT_HOST.to_string(),
            pacer: Pacer::new(),
            records: RecordCache::new(),
        })
    }

    /// API 호스트를 변경합니다 (테스트용 목 서버 주입 등).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// 환경 변수에서 생성.
    ///
    /// 환경 변수가 없거나 클라이언트 생성에 실패하면 `None`을 반환합니다.
    pub fn from_env() -> Option<Self> {
        ExchangeOptions::from_env().and_then(|options| Self::new(options).ok())
    }

    /// 파라미터에서 쿼리 문자열 생성.
    fn build_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 인증 요청 파이프라인.
    ///
    /// Bearer 인증 헤더를 붙여 요청을 보내고, 상태 코드와 JSON 본문을
    /// 돌려줍니다. 브로커는 에러도 JSON 본문으로 내려주므로 비정상
    /// 상태에서도 본문 파싱을 시도합니다. 호출 카운터는 요청 결과와
    /// 무관하게 진입 시점에 올라갑니다.
    async fn get_auth_json(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ExchangeResult<(u16, Value)> {
        self.pacer.record_call();

        let payload = match body {
            Some(value) => serde_json::to_vec(value).map_err(|e| {
                ExchangeError::Network(format!("[{} {}] body serialization failed: {}", method, path, e))
            })?,
            None => Vec::new(),
        };

        debug!("{} {}", method, path);

        let url = format!("{}{}", self.host, path);
        let response = self
            .client
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.options.secret_key),
            )
            .body(payload)
            .send()
            .await
            .map_err(|e| ExchangeError::Network(format!("[{} {}] HTTP error: {}", method, path, e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(format!("[{} {}] HTTP error: {}", method, path, e)))?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ExchangeError::Parse(format!("[{} {}] invalid JSON body: {}", method, path, e)))?;

        Ok((status, json))
    }

    /// 공개 엔드포인트 요청 (인증 불필요).
    ///
    /// 호가/캔들 조회에 사용합니다. 호출 카운터를 소모하지 않습니다.
    async fn get_public_json(&self, path: &str) -> ExchangeResult<Value> {
        debug!("GET {}", path);

        let url = format!("{}{}", self.host, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExchangeError::Network(format!("[GET {}] HTTP error: {}", path, e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(format!("[GET {}] HTTP error: {}", path, e)))?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ExchangeError::Parse(format!("[GET {}] invalid JSON body: {}", path, e)))?;

        Ok(json)
    }

    /// 상품 토큰을 검증합니다. 실패 시 네트워크 호출 없이 거부됩니다.
    fn parse_instrument(op: &str, token: &str) -> ExchangeResult<Instrument> {
        token.parse().map_err(|e: String| {
            error!(instrument = %token, "{}() error, {}", op, e);
            ExchangeError::Validation(e)
        })
    }

    /// 주기 토큰을 검증합니다.
    fn parse_timeframe(op: &str, token: &str) -> ExchangeResult<Timeframe> {
        token.parse().map_err(|e: String| {
            error!(timeframe = %token, "{}() error, {}", op, e);
            ExchangeError::Validation(e)
        })
    }

    /// 방향 토큰을 검증합니다.
    fn parse_side(op: &str, token: &str) -> ExchangeResult<TradeSide> {
        token.parse().map_err(|e: String| {
            error!(side = %token, "{}() error, {}", op, e);
            ExchangeError::Validation(e)
        })
    }

    /// 레거시 응답의 `result` 플래그를 확인합니다.
    fn result_flag(json: &Value) -> bool {
        json.get("result").and_then(Value::as_bool).unwrap_or(false)
    }

    /// 레거시 응답 본문의 브로커 에러를 변환합니다.
    fn api_error(json: &Value) -> ExchangeError {
        ExchangeError::Api {
            code: convert::as_text(json.get("error_code")),
            message: convert::as_text(json.get("error_msg")),
        }
    }

    /// 주문 JSON 하나를 `Order`로 변환합니다.
    fn map_order(json: &Value, instrument: Instrument) -> ExchangeResult<Order> {
        let code = convert::as_i64(json.get("type"));
        let side = TradeSide::from_broker_code(code)
            .ok_or_else(|| ExchangeError::Data(format!("unrecognized trade type code: {}", code)))?;

        Ok(Order {
            id: convert::as_text(json.get("order_id")),
            price: convert::as_decimal(json.get("price")),
            amount: convert::as_decimal(json.get("amount")),
            deal_amount: convert::as_decimal(json.get("deal_amount")),
            fee: convert::as_decimal(json.get("fee")),
            side,
            instrument,
        })
    }

    /// 주문 목록 엔드포인트를 조회해 `Order` 목록으로 변환합니다.
    ///
    /// `status`는 1(미체결) 또는 2(체결)입니다.
    async fn fetch_order_list(
        &mut self,
        op: &str,
        instrument: Instrument,
        status: &str,
    ) -> ExchangeResult<Vec<Order>> {
        let query = Self::build_query(&[
            ("symbol", instrument.broker_symbol().to_string()),
            ("contract_type", instrument.tenor().broker_code().to_string()),
            ("status", status.to_string()),
            ("order_id", "-1".to_string()),
            ("current_page", "1".to_string()),
            ("page_length", "50".to_string()),
        ]);
        let path = format!("/api/v1/future_order_info.do?{}", query);

        let (_, json) = self
            .get_auth_json(Method::GET, &path, None)
            .await
            .map_err(|e| log_fail(op, e))?;
        if !Self::result_flag(&json) {
            return Err(log_fail(op, Self::api_error(&json)));
        }

        let empty = Vec::new();
        let rows = json.get("orders").and_then(Value::as_array).unwrap_or(&empty);
        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(Self::map_order(row, instrument).map_err(|e| log_fail(op, e))?);
        }
        Ok(orders)
    }
}

#[async_trait]
impl Exchange for OandaV20Client {
    fn name(&self) -> &str {
        &self.options.name
    }

    fn exchange_type(&self) -> &str {
        &self.options.exchange_type
    }

    fn min_amount(&self, instrument: Instrument) -> Decimal {
        instrument.min_amount()
    }

    fn set_limit(&mut self, calls_per_second: f64) -> f64 {
        self.pacer.set_limit(calls_per_second)
    }

    async fn auto_sleep(&mut self) {
        self.pacer.auto_sleep().await;
    }

    async fn get_account(&mut self) -> ExchangeResult<Balance> {
        let path = format!("/v3/accounts/{}/summary", self.options.access_key);
        let (status, json) = self
            .get_auth_json(Method::GET, &path, None)
            .await
            .map_err(|e| log_fail("GetAccount", e))?;

        if status > 200 {
            let message = convert::as_text(json.get("errorMessage"));
            return Err(log_fail(
                "GetAccount",
                ExchangeError::Api {
                    code: status.to_string(),
                    message,
                },
            ));
        }

        let currency = convert::as_text(json.pointer("/account/currency"));
        if currency.is_empty() {
            return Err(log_fail(
                "GetAccount",
                ExchangeError::Data("can not get the currency".to_string()),
            ));
        }

        Ok(Balance {
            currency,
            available: convert::as_decimal(json.pointer("/account/marginAvailable")),
            frozen: Decimal::ZERO,
        })
    }

    async fn get_positions(&mut self, instrument: &str) -> ExchangeResult<Vec<Position>> {
        let instrument = Self::parse_instrument("GetPositions", instrument)?;

        let path = format!(
            "/v3/accounts/{}/positions/{}",
            self.options.access_key,
            instrument.position_path()
        );
        let (status, json) = self
            .get_auth_json(Method::GET, &path, None)
            .await
            .map_err(|e| log_fail("GetPositions", e))?;

        if status > 200 {
            // 포지션 없음은 정상 상태
            if convert::as_text(json.get("errorCode")) == NO_SUCH_POSITION {
                return Ok(Vec::new());
            }
            let message = convert::as_text(json.get("errorMessage"));
            return Err(log_fail(
                "GetPositions",
                ExchangeError::Api {
                    code: status.to_string(),
                    message,
                },
            ));
        }

        let mut positions = Vec::new();
        for (sub, side) in [("long", TradeSide::Long), ("short", TradeSide::Short)] {
            let amount = convert::as_decimal(json.pointer(&format!("/position/{}/units", sub)));
            if amount > Decimal::ZERO {
                positions.push(Position {
                    price: convert::as_decimal(
                        json.pointer(&format!("/position/{}/averagePrice", sub)),
                    ),
                    leverage: 1,
                    amount,
                    confirm_amount: amount,
                    frozen_amount: Decimal::ZERO,
                    profit: convert::as_decimal(
                        json.pointer(&format!("/position/{}/resettablePL", sub)),
                    ),
                    tenor: None,
                    side,
                    instrument,
                });
            }
        }
        Ok(positions)
    }

    async fn trade(&mut self, request: TradeRequest) -> ExchangeResult<String> {
        let side = Self::parse_side("Trade", &request.side)?;
        let instrument = Self::parse_instrument("Trade", &request.instrument)?;

        // 가격이 없으면 시장가 주문
        let (price, match_price) = if request.price > Decimal::ZERO {
            (request.price, "0")
        } else {
            (Decimal::ZERO, "1")
        };

        let query = Self::build_query(&[
            ("symbol", instrument.broker_symbol().to_string()),
            ("contract_type", instrument.tenor().broker_code().to_string()),
            ("price", price.to_string()),
            ("amount", request.amount.to_string()),
            ("type", side.broker_code().to_string()),
            ("match_price", match_price.to_string()),
            ("lever_rate", request.leverage.broker_value().to_string()),
        ]);
        let path = format!("/api/v1/future_trade.do?{}", query);

        let (_, json) = self
            .get_auth_json(Method::GET, &path, None)
            .await
            .map_err(|e| log_fail("Trade", e))?;
        if !Self::result_flag(&json) {
            return Err(log_fail("Trade", Self::api_error(&json)));
        }

        journal(
            side.journal_tag(),
            instrument.token(),
            price,
            request.amount,
            &request.tags,
        );
        Ok(convert::as_text(json.get("order_id")))
    }

    async fn get_order(&mut self, instrument: &str, id: &str) -> ExchangeResult<Order> {
        let instrument = Self::parse_instrument("GetOrder", instrument)?;

        let query = Self::build_query(&[
            ("symbol", instrument.broker_symbol().to_string()),
            ("contract_type", instrument.tenor().broker_code().to_string()),
            ("order_id", id.to_string()),
        ]);
        let path = format!("/api/v1/future_orders_info.do?{}", query);

        let (_, json) = self
            .get_auth_json(Method::GET, &path, None)
            .await
            .map_err(|e| log_fail("GetOrder", e))?;
        if !Self::result_flag(&json) {
            return Err(log_fail("GetOrder", Self::api_error(&json)));
        }

        match json.get("orders").and_then(Value::as_array).and_then(|a| a.first()) {
            Some(row) => Self::map_order(row, instrument).map_err(|e| log_fail("GetOrder", e)),
            None => Err(log_fail(
                "GetOrder",
                ExchangeError::Data(format!("order not found: {}", id)),
            )),
        }
    }

    async fn get_orders(&mut self, instrument: &str) -> ExchangeResult<Vec<Order>> {
        let instrument = Self::parse_instrument("GetOrders", instrument)?;
        self.fetch_order_list("GetOrders", instrument, "1").await
    }

    async fn get_trades(&mut self, instrument: &str) -> ExchangeResult<Vec<Order>> {
        let instrument = Self::parse_instrument("GetTrades", instrument)?;
        self.fetch_order_list("GetTrades", instrument, "2").await
    }

    async fn cancel_order(&mut self, order: &Order) -> ExchangeResult<bool> {
        let instrument = order.instrument;

        let query = Self::build_query(&[
            ("symbol", instrument.broker_symbol().to_string()),
            ("order_id", order.id.clone()),
            ("contract_type", instrument.tenor().broker_code().to_string()),
        ]);
        let path = format!("/api/v1/future_cancel.do?{}", query);

        let (_, json) = self
            .get_auth_json(Method::GET, &path, None)
            .await
            .map_err(|e| log_fail("CancelOrder", e))?;
        if !Self::result_flag(&json) {
            return Err(log_fail("CancelOrder", Self::api_error(&json)));
        }

        journal(
            "CANCEL",
            instrument.token(),
            order.price,
            order.remaining(),
            &[format!("order_id={}", order.id)],
        );
        Ok(true)
    }

    async fn get_ticker(
        &mut self,
        instrument: &str,
        size: Option<usize>,
    ) -> ExchangeResult<Ticker> {
        let instrument = Self::parse_instrument("GetTicker", instrument)?;
        let size = size.filter(|s| *s > 0).unwrap_or(DEFAULT_DEPTH_SIZE);

        let path = format!(
            "/api/v1/future_depth.do?symbol={}&contract_type={}&size={}",
            instrument.broker_symbol(),
            instrument.tenor().broker_code(),
            size
        );
        let json = self
            .get_public_json(&path)
            .await
            .map_err(|e| log_fail("GetTicker", e))?;

        let empty = Vec::new();

        // 매수 호가는 전달 순서 그대로 (최우선 먼저)
        let mut bids = Vec::new();
        for level in json.get("bids").and_then(Value::as_array).unwrap_or(&empty) {
            bids.push(DepthLevel {
                price: convert::as_decimal(level.get(0)),
                amount: convert::as_decimal(level.get(1)),
            });
        }

        // 매도 호가는 역순으로 소비해 최우선 먼저(오름차순)로 정규화
        let mut asks = Vec::new();
        for level in json
            .get("asks")
            .and_then(Value::as_array)
            .unwrap_or(&empty)
            .iter()
            .rev()
        {
            asks.push(DepthLevel {
                price: convert::as_decimal(level.get(0)),
                amount: convert::as_decimal(level.get(1)),
            });
        }

        if bids.is_empty() || asks.is_empty() {
            return Err(log_fail(
                "GetTicker",
                ExchangeError::Data("can not get enough bids or asks".to_string()),
            ));
        }

        let buy = bids[0].price;
        let sell = asks[0].price;
        Ok(Ticker {
            buy,
            sell,
            mid: (buy + sell) / Decimal::from(2),
            bids,
            asks,
            timestamp: Utc::now(),
        })
    }

    async fn get_records(
        &mut self,
        instrument: &str,
        timeframe: &str,
        size: Option<usize>,
    ) -> ExchangeResult<Vec<Record>> {
        let instrument = Self::parse_instrument("GetRecords", instrument)?;
        let timeframe = Self::parse_timeframe("GetRecords", timeframe)?;
        let window = size.filter(|s| *s > 0).unwrap_or(DEFAULT_RECORD_WINDOW);

        let path = format!(
            "/api/v1/future_kline.do?symbol={}&contract_type={}&type={}&size={}",
            instrument.broker_symbol(),
            instrument.tenor().broker_code(),
            timeframe.broker_period(),
            window
        );
        let json = self
            .get_public_json(&path)
            .await
            .map_err(|e| log_fail("GetRecords", e))?;

        let rows = json.as_array().ok_or_else(|| {
            log_fail(
                "GetRecords",
                ExchangeError::Data("kline response is not an array".to_string()),
            )
        })?;

        // 배치는 최신순, 각 행은 [time_ms, open, high, low, close, volume]
        let mut fetched = Vec::with_capacity(rows.len());
        for row in rows {
            fetched.push(Record {
                time: convert::as_i64(row.get(0)) / 1000,
                open: convert::as_decimal(row.get(1)),
                high: convert::as_decimal(row.get(2)),
                low: convert::as_decimal(row.get(3)),
                close: convert::as_decimal(row.get(4)),
                volume: convert::as_decimal(row.get(5)),
            });
        }

        Ok(self.records.merge(timeframe, &fetched, window))
    }
}
