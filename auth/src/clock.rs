use chrono::Utc;

/// Source of the current time in Unix epoch seconds.
///
/// Injected into the token codec so issuance and expiry checks can be pinned
/// in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}
