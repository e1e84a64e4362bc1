//! 토큰 시간 계산용 시계.

use chrono::{DateTime, Utc};

/// 현재 시각(Unix timestamp, 초) 제공자.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> i64;
}

/// 시스템 시계.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// 고정 시계 (테스트 및 재현용).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
