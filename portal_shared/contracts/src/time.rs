use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Expiry evaluation must never read the wall clock directly so that tests
/// can pin "now" to an arbitrary instant.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.expect_now().return_const(now);
        self
    }
}
