//! OandaV20 커넥터 통합 테스트.
//!
//! mockito 목 서버로 브로커 응답을 재현해 요청 파이프라인과
//! 필드 매핑, 검증 단락(short-circuit)을 검증합니다.

use futrader_core::{ExchangeOptions, Instrument, Leverage, Order, TradeSide};
use futrader_exchange::{Exchange, ExchangeError, OandaV20Client, TradeRequest};
use mockito::{Matcher, ServerGuard};
use rust_decimal_macros::dec;
use serde_json::json;

const ACCESS_KEY: &str = "101-001-0000001-001";

fn test_client(server: &ServerGuard) -> OandaV20Client {
    let options = ExchangeOptions::new(ACCESS_KEY, "sk-test").with_tags("oandav20", "oanda-test");
    OandaV20Client::new(options)
        .expect("클라이언트 생성 실패")
        .with_host(server.url())
}

#[tokio::test]
async fn validation_errors_issue_no_network_calls() {
    let mut server = mockito::Server::new_async().await;
    let guard = server
        .mock("GET", Matcher::Regex(".*".to_string()))
        .expect(0)
        .create_async()
        .await;
    let mut client = test_client(&server);

    let err = client.get_positions("ETH.WEEK/USD").await.unwrap_err();
    assert!(err.is_validation());

    let err = client
        .trade(TradeRequest::new(
            "HEDGE",
            "BTC.WEEK/USD",
            dec!(430.5),
            dec!(3),
            Leverage::X10,
        ))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .get_records("BTC.WEEK/USD", "Y", None)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client.get_ticker("DOGE/USD", None).await.unwrap_err();
    assert!(err.is_validation());

    let err = client.get_orders("BTC/KRW").await.unwrap_err();
    assert!(err.is_validation());

    guard.assert_async().await;
}

#[tokio::test]
async fn get_account_maps_summary() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("/v3/accounts/{}/summary", ACCESS_KEY).as_str())
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .with_body(
            json!({
                "account": { "currency": "USD", "marginAvailable": "1203.55" }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let balance = client.get_account().await.unwrap();

    assert_eq!(balance.currency, "USD");
    assert_eq!(balance.available, dec!(1203.55));
    assert_eq!(balance.frozen, dec!(0));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_account_fails_without_currency() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/v3/accounts/{}/summary", ACCESS_KEY).as_str())
        .with_body(json!({ "account": {} }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let err = client.get_account().await.unwrap_err();
    assert!(matches!(err, ExchangeError::Data(_)));
}

#[tokio::test]
async fn get_account_surfaces_broker_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/v3/accounts/{}/summary", ACCESS_KEY).as_str())
        .with_status(401)
        .with_body(json!({ "errorMessage": "Insufficient authorization" }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    match client.get_account().await.unwrap_err() {
        ExchangeError::Api { code, message } => {
            assert_eq!(code, "401");
            assert_eq!(message, "Insufficient authorization");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    // 아무도 리슨하지 않는 포트
    let options = ExchangeOptions::new(ACCESS_KEY, "sk-test");
    let mut client = OandaV20Client::new(options)
        .unwrap()
        .with_host("http://127.0.0.1:1");

    let err = client.get_account().await.unwrap_err();
    assert!(matches!(err, ExchangeError::Network(_)));
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/v3/accounts/{}/summary", ACCESS_KEY).as_str())
        .with_body("<html>gateway timeout</html>")
        .create_async()
        .await;
    let mut client = test_client(&server);

    let err = client.get_account().await.unwrap_err();
    assert!(matches!(err, ExchangeError::Parse(_)));
}

#[tokio::test]
async fn no_such_position_is_empty_not_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            format!("/v3/accounts/{}/positions/BTC.WEEK_USD", ACCESS_KEY).as_str(),
        )
        .with_status(404)
        .with_body(
            json!({ "errorCode": "NO_SUCH_POSITION", "errorMessage": "The position does not exist" })
                .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let positions = client.get_positions("BTC.WEEK/USD").await.unwrap();
    assert!(positions.is_empty());
}

#[tokio::test]
async fn get_positions_skips_flat_sides() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            format!("/v3/accounts/{}/positions/BTC.WEEK_USD", ACCESS_KEY).as_str(),
        )
        .with_body(
            json!({
                "position": {
                    "long": { "units": "0", "averagePrice": "0", "resettablePL": "0" },
                    "short": { "units": "5", "averagePrice": "431.2", "resettablePL": "-12.5" }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let positions = client.get_positions("BTC.WEEK/USD").await.unwrap();

    assert_eq!(positions.len(), 1);
    let position = &positions[0];
    assert_eq!(position.side, TradeSide::Short);
    assert_eq!(position.amount, dec!(5));
    assert_eq!(position.confirm_amount, dec!(5));
    assert_eq!(position.price, dec!(431.2));
    assert_eq!(position.profit, dec!(-12.5));
    assert_eq!(position.instrument, Instrument::BtcWeek);
}

#[tokio::test]
async fn trade_places_limit_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/api/v1/future_trade.do?symbol=btc_usd&contract_type=this_week&price=430.5&amount=3&type=1&match_price=0&lever_rate=10",
        )
        .match_header("authorization", "Bearer sk-test")
        .with_body(json!({ "result": true, "order_id": 98765 }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let request = TradeRequest::new("LONG", "BTC.WEEK/USD", dec!(430.5), dec!(3), Leverage::X10)
        .with_tags(vec!["breakout entry".to_string()]);
    let order_id = client.trade(request).await.unwrap();

    assert_eq!(order_id, "98765");
    mock.assert_async().await;
}

#[tokio::test]
async fn trade_without_price_is_market_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/api/v1/future_trade.do?symbol=ltc_usd&contract_type=quarter&price=0&amount=10&type=2&match_price=1&lever_rate=20",
        )
        .with_body(json!({ "result": true, "order_id": "11" }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let request = TradeRequest::new("SHORT", "LTC.MONTH3/USD", dec!(0), dec!(10), Leverage::X20);
    let order_id = client.trade(request).await.unwrap();

    assert_eq!(order_id, "11");
    mock.assert_async().await;
}

#[tokio::test]
async fn trade_rejected_by_broker() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex("/api/v1/future_trade.do.*".to_string()))
        .with_body(json!({ "result": false, "error_code": 20012 }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let request = TradeRequest::new("LONG", "BTC.WEEK/USD", dec!(430.5), dec!(3), Leverage::X10);
    match client.trade(request).await.unwrap_err() {
        ExchangeError::Api { code, .. } => assert_eq!(code, "20012"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn get_order_maps_fields() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            "/api/v1/future_orders_info.do?symbol=btc_usd&contract_type=this_week&order_id=98765",
        )
        .with_body(
            json!({
                "result": true,
                "orders": [{
                    "order_id": 98765,
                    "price": 430.5,
                    "amount": 3.0,
                    "deal_amount": 1.0,
                    "fee": 0.012,
                    "type": 1
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let order = client.get_order("BTC.WEEK/USD", "98765").await.unwrap();

    assert_eq!(order.id, "98765");
    assert_eq!(order.price, dec!(430.5));
    assert_eq!(order.deal_amount, dec!(1));
    assert_eq!(order.side, TradeSide::Long);
    assert_eq!(order.instrument, Instrument::BtcWeek);
}

#[tokio::test]
async fn get_order_not_found_is_data_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            Matcher::Regex("/api/v1/future_orders_info.do.*".to_string()),
        )
        .with_body(json!({ "result": true, "orders": [] }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let err = client.get_order("BTC.WEEK/USD", "404404").await.unwrap_err();
    assert!(matches!(err, ExchangeError::Data(_)));
}

#[tokio::test]
async fn get_orders_requests_unfilled_page() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/api/v1/future_order_info.do?symbol=btc_usd&contract_type=next_week&status=1&order_id=-1&current_page=1&page_length=50",
        )
        .with_body(
            json!({
                "result": true,
                "orders": [
                    { "order_id": 1, "price": 430.0, "amount": 1.0, "deal_amount": 0.0, "fee": 0.0, "type": 1 },
                    { "order_id": 2, "price": 432.0, "amount": 2.0, "deal_amount": 0.5, "fee": 0.001, "type": 4 }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let orders = client.get_orders("BTC.WEEK2/USD").await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].side, TradeSide::Long);
    assert_eq!(orders[1].side, TradeSide::ShortClose);
    mock.assert_async().await;
}

#[tokio::test]
async fn get_trades_requests_filled_page() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            "/api/v1/future_order_info.do?symbol=ltc_usd&contract_type=this_week&status=2&order_id=-1&current_page=1&page_length=50",
        )
        .with_body(json!({ "result": true, "orders": [] }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let trades = client.get_trades("LTC.WEEK/USD").await.unwrap();

    assert!(trades.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn cancel_order_reports_outcome() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            "/api/v1/future_cancel.do?symbol=btc_usd&order_id=98765&contract_type=this_week",
        )
        .with_body(json!({ "result": true }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let order = Order {
        id: "98765".to_string(),
        price: dec!(430.5),
        amount: dec!(3),
        deal_amount: dec!(1),
        fee: dec!(0.012),
        side: TradeSide::Long,
        instrument: Instrument::BtcWeek,
    };
    assert!(client.cancel_order(&order).await.unwrap());

    // 브로커가 거부하면 에러로 떨어진다
    let _mock = server
        .mock(
            "GET",
            Matcher::Regex("/api/v1/future_cancel.do.*order_id=1.*".to_string()),
        )
        .with_body(json!({ "result": false, "error_code": 20015 }).to_string())
        .create_async()
        .await;

    let gone = Order { id: "1".to_string(), ..order };
    let err = client.cancel_order(&gone).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Api { .. }));
}

#[tokio::test]
async fn get_ticker_normalizes_depth() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            "/api/v1/future_depth.do?symbol=btc_usd&contract_type=this_week&size=20",
        )
        .with_body(
            json!({
                "bids": [[100, 1], [99, 2]],
                "asks": [[102, 2], [101, 1]]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let ticker = client.get_ticker("BTC.WEEK/USD", None).await.unwrap();

    assert_eq!(ticker.buy, dec!(100));
    assert_eq!(ticker.sell, dec!(101));
    assert_eq!(ticker.mid, dec!(100.5));
    // 매도 호가는 최우선 먼저(오름차순)로 정규화된다
    assert_eq!(ticker.asks[0].price, dec!(101));
    assert_eq!(ticker.asks[1].price, dec!(102));
    assert_eq!(ticker.bids[0].amount, dec!(1));
}

#[tokio::test]
async fn get_ticker_requires_both_sides() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            Matcher::Regex("/api/v1/future_depth.do.*".to_string()),
        )
        .with_body(json!({ "bids": [], "asks": [[101, 1]] }).to_string())
        .create_async()
        .await;
    let mut client = test_client(&server);

    let err = client.get_ticker("BTC.WEEK/USD", None).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Data(_)));
}

#[tokio::test]
async fn get_records_merges_incrementally() {
    let mut server = mockito::Server::new_async().await;

    // 첫 조회: 빈 캐시에 최신순 배치가 오름차순으로 들어간다
    let _first = server
        .mock(
            "GET",
            "/api/v1/future_kline.do?symbol=btc_usd&contract_type=this_week&type=1min&size=200",
        )
        .with_body(
            json!([
                [300000, 3.0, 3.0, 3.0, 3.0, 10.0],
                [200000, 2.0, 2.0, 2.0, 2.0, 10.0],
                [100000, 1.0, 1.0, 1.0, 1.0, 10.0]
            ])
            .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let records = client
        .get_records("BTC.WEEK/USD", "M", Some(200))
        .await
        .unwrap();
    assert_eq!(
        records.iter().map(|r| r.time).collect::<Vec<_>>(),
        vec![100, 200, 300]
    );

    // 두 번째 조회: 진행 중이던 t=300 봉은 제자리에서 덮어쓰고
    // t=400 봉만 새로 붙는다
    let _second = server
        .mock(
            "GET",
            "/api/v1/future_kline.do?symbol=btc_usd&contract_type=this_week&type=1min&size=300",
        )
        .with_body(
            json!([
                [400000, 4.0, 4.0, 4.0, 4.0, 10.0],
                [300000, 3.5, 3.5, 3.5, 3.5, 12.0]
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let records = client
        .get_records("BTC.WEEK/USD", "M", Some(300))
        .await
        .unwrap();
    assert_eq!(
        records.iter().map(|r| r.time).collect::<Vec<_>>(),
        vec![100, 200, 300, 400]
    );
    assert_eq!(records[2].close, dec!(3.5));
    assert_eq!(records[3].close, dec!(4));
}

#[tokio::test]
async fn get_records_bounds_window() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock(
            "GET",
            "/api/v1/future_kline.do?symbol=btc_usd&contract_type=this_week&type=1min&size=2",
        )
        .with_body(
            json!([
                [300000, 3.0, 3.0, 3.0, 3.0, 10.0],
                [200000, 2.0, 2.0, 2.0, 2.0, 10.0],
                [100000, 1.0, 1.0, 1.0, 1.0, 10.0]
            ])
            .to_string(),
        )
        .create_async()
        .await;
    let mut client = test_client(&server);

    let records = client
        .get_records("BTC.WEEK/USD", "M", Some(2))
        .await
        .unwrap();

    // 가장 오래된 캔들부터 밀려난다
    assert_eq!(
        records.iter().map(|r| r.time).collect::<Vec<_>>(),
        vec![200, 300]
    );
}
