//! Clock abstraction for time-dependent services
//!
//! The GUI throttle is the only component with a genuine temporal concern;
//! injecting the clock keeps the 300 ms window testable and avoids the
//! global start-time state of older designs.

use chrono::Utc;

/// Source of epoch-millisecond timestamps
pub trait Clock: Send {
    /// Current time as milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall-clock implementation used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
