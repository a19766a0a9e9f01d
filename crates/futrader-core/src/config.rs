//! 거래소 접속 설정.
//!
//! 이 모듈은 어댑터 생성 시 주입되는 읽기 전용 설정을 정의합니다.
//! 자격증명은 로그에 노출되지 않도록 `Debug` 구현에서 마스킹됩니다.

use serde::Deserialize;
use std::fmt;

/// 거래소 접속 옵션.
///
/// 프레임워크가 어댑터를 생성할 때 전달하는 자격증명과 식별 태그입니다.
///
/// # 보안
/// - `Debug` 구현은 민감 정보(`access_key`, `secret_key`)를 마스킹합니다.
#[derive(Clone, Deserialize)]
pub struct ExchangeOptions {
    /// 계좌 식별자 (브로커 계좌 ID)
    pub access_key: String,
    /// API 시크릿 (Bearer 토큰)
    pub secret_key: String,
    /// 이 어댑터를 소유한 트레이더 ID
    pub trader_id: i64,
    /// 거래소 유형 태그 (예: "oandav20")
    pub exchange_type: String,
    /// 거래소 표시 이름
    pub name: String,
}

impl fmt::Debug for ExchangeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked_key = if self.access_key.len() > 8 {
            format!(
                "{}...{}",
                &self.access_key[..4],
                &self.access_key[self.access_key.len() - 4..]
            )
        } else {
            "***REDACTED***".to_string()
        };

        f.debug_struct("ExchangeOptions")
            .field("access_key", &masked_key)
            .field("secret_key", &"***REDACTED***")
            .field("trader_id", &self.trader_id)
            .field("exchange_type", &self.exchange_type)
            .field("name", &self.name)
            .finish()
    }
}

impl ExchangeOptions {
    /// 새 옵션을 생성합니다.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            trader_id: 0,
            exchange_type: "oandav20".to_string(),
            name: "OandaV20".to_string(),
        }
    }

    /// 트레이더 ID를 설정합니다.
    pub fn with_trader_id(mut self, trader_id: i64) -> Self {
        self.trader_id = trader_id;
        self
    }

    /// 거래소 태그를 설정합니다.
    pub fn with_tags(mut self, exchange_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.exchange_type = exchange_type.into();
        self.name = name.into();
        self
    }

    /// 환경 변수에서 생성.
    ///
    /// `.env` 파일이 있으면 먼저 로드합니다. `FUTRADER_ACCESS_KEY` /
    /// `FUTRADER_SECRET_KEY`가 설정되지 않았으면 `None`을 반환합니다.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();

        let access_key = std::env::var("FUTRADER_ACCESS_KEY").ok()?;
        let secret_key = std::env::var("FUTRADER_SECRET_KEY").ok()?;
        let trader_id = std::env::var("FUTRADER_TRADER_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Some(Self {
            access_key,
            secret_key,
            trader_id,
            exchange_type: "oandav20".to_string(),
            name: "OandaV20".to_string(),
        })
    }
}
