use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Wall clock that never hands out the same instant twice.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_nanos: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
        let mut last = self.last_nanos.load(Ordering::Acquire);
        loop {
            let next = wall.max(last.saturating_add(1));
            match self
                .last_nanos
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Utc.timestamp_nanos(next),
                Err(current) => last = current,
            }
        }
    }
}
