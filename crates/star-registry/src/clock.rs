//! Time source for challenge issuance and block timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

/// Capability for reading the current time in Unix seconds.
pub trait Clock: Send + Sync {
    /// Current time (Unix seconds).
    fn now(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(e) => -(e.duration().as_secs() as i64),
        }
    }
}
