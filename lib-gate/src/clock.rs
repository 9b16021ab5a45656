use chrono::{DateTime, Utc};

/// Wall clock source for expiry judgement and cookie expiry
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;

  /// Current unix time in whole secs
  fn unix_seconds(&self) -> i64 {
    self.now().timestamp()
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;
