//! 캔들스틱 증분 캐시.
//!
//! 브로커가 최신순으로 내려주는 캔들 배치를 타임프레임별 시리즈에
//! 중복 없이 병합합니다. 시리즈는 타임스탬프 오름차순으로 유지되며
//! 요청한 윈도우 크기를 넘지 않도록 앞에서부터 잘립니다.

use futrader_core::{Record, Timeframe};
use std::collections::HashMap;

/// 타임프레임별 캔들 시리즈 캐시.
///
/// 어댑터 인스턴스가 단독 소유하며 `merge`로만 변경됩니다.
#[derive(Debug, Default)]
pub struct RecordCache {
    series: HashMap<Timeframe, Vec<Record>>,
}

impl RecordCache {
    /// 빈 캐시를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 캐시된 시리즈 길이를 반환합니다.
    pub fn len(&self, timeframe: Timeframe) -> usize {
        self.series.get(&timeframe).map_or(0, Vec::len)
    }

    /// 캐시가 비어 있는지 확인합니다.
    pub fn is_empty(&self, timeframe: Timeframe) -> bool {
        self.len(timeframe) == 0
    }

    /// 새로 받은 캔들 배치를 시리즈에 병합하고 전체 시리즈를 반환합니다.
    ///
    /// `fetched`는 브로커 전달 순서 그대로 최신순(인덱스 0 = 최신)이어야
    /// 합니다. 최신 캔들부터 걸어 내려가면서:
    /// - 마지막 캐시 시각보다 새 캔들은 staging 앞에 붙이고 (staging은
    ///   오름차순 누적),
    /// - 마지막 캐시 시각과 같은 캔들은 아직 진행 중인 봉이므로 캐시의
    ///   마지막 원소를 제자리에서 덮어쓰고 (값이 같아도 동일하게 처리),
    /// - 더 오래된 캔들을 만나면 나머지는 이미 캐시에 있으므로 즉시
    ///   중단합니다.
    ///
    /// 같은 배치를 두 번 병합해도 결과는 변하지 않습니다.
    pub fn merge(&mut self, timeframe: Timeframe, fetched: &[Record], window: usize) -> Vec<Record> {
        let cached = self.series.entry(timeframe).or_default();
        let last_time = cached.last().map(|r| r.time);

        let mut staged: Vec<Record> = Vec::new();
        for bar in fetched {
            match last_time {
                Some(last) if bar.time == last => {
                    let last_index = cached.len() - 1;
                    cached[last_index] = bar.clone();
                }
                Some(last) if bar.time < last => break,
                _ => staged.insert(0, bar.clone()),
            }
        }

        cached.extend(staged);
        if cached.len() > window {
            let excess = cached.len() - window;
            cached.drain(..excess);
        }

        cached.clone()
    }
}
