//! 호출 속도 제한.
//!
//! 브로커의 초당 호출 한도를 지키기 위한 협조적 pacer입니다.
//! 파이프라인이 호출마다 카운터를 올리고, 소비자가 호출 묶음 사이에서
//! `auto_sleep`을 호출해 필요한 만큼 대기합니다. 호출 단위로 강제하지
//! 않으므로 묶음 내 버스트는 허용됩니다.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// 기본 초당 호출 한도.
const DEFAULT_LIMIT: f64 = 10.0;

/// 자가 조절 호출 pacer.
#[derive(Debug)]
pub struct Pacer {
    /// 초당 호출 한도
    limit: f64,
    /// pacing 기준 시각 - 직전 `auto_sleep` 시점
    last_pace: Instant,
    /// 기준 시각 이후 누적된 호출 수
    calls: u64,
}

impl Pacer {
    /// 기본 한도(10/s)로 pacer를 생성합니다.
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            last_pace: Instant::now(),
            calls: 0,
        }
    }

    /// 초당 호출 한도를 설정하고 적용된 값을 반환합니다.
    ///
    /// 0 이하의 값은 무시되고 기존 한도가 유지됩니다.
    pub fn set_limit(&mut self, calls_per_second: f64) -> f64 {
        if calls_per_second > 0.0 {
            self.limit = calls_per_second;
        }
        self.limit
    }

    /// 호출 1회를 기록합니다.
    ///
    /// 실패한 호출도 브로커 한도를 소모하므로 호출 결과와 무관하게
    /// 파이프라인 진입 시점에 기록됩니다.
    pub fn record_call(&mut self) {
        self.calls += 1;
    }

    /// 기준 시각 이후 누적된 호출 수를 반환합니다.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// 누적 호출 수가 한도를 넘지 않도록 필요한 만큼 대기합니다.
    ///
    /// `(1e9 / limit) * calls - 경과 나노초`가 양수이면 그만큼 잠들고,
    /// 호출 카운터를 0으로 초기화한 뒤 현재 시각을 새 기준으로 잡습니다.
    pub async fn auto_sleep(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_pace).as_nanos() as f64;
        let interval = 1e9 / self.limit * self.calls as f64 - elapsed;
        if interval > 0.0 {
            debug!(sleep_nanos = interval as u64, calls = self.calls, "Pacing");
            tokio::time::sleep(Duration::from_nanos(interval as u64)).await;
        }
        self.calls = 0;
        self.last_pace = now;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}
