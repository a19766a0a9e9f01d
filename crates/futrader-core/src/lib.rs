//! # Futrader Core
//!
//! 선물 트레이딩 봇의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 트레이딩 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 주문 및 포지션 엔티티
//! - 시장 데이터 구조체 (캔들, 호가)
//! - 거래 방향 / 레버리지 / 만기 / 타임프레임 열거형
//! - 거래소 접속 설정
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
