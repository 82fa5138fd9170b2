use chrono::{DateTime, Utc};
use portal_auth_contracts::{expired_at, parse_expiration, TokenGateService};
use portal_shared_contracts::time::TimeService;

#[derive(Debug, Clone, Default)]
pub struct TokenGateServiceImpl<Time> {
    time: Time,
}

impl<Time> TokenGateServiceImpl<Time> {
    pub fn new(time: Time) -> Self {
        Self { time }
    }
}

impl<Time> TokenGateService for TokenGateServiceImpl<Time>
where
    Time: TimeService,
{
    #[tracing::instrument(level = "trace", skip(self))]
    fn is_expired(&self, expires_at: DateTime<Utc>) -> bool {
        expired_at(expires_at, self.time.now())
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn is_expired_raw(&self, raw: &str) -> bool {
        match parse_expiration(raw) {
            Ok(expires_at) => self.is_expired(expires_at),
            Err(err) => {
                tracing::warn!(%err, "Failed to parse stored token expiration, treating as expired");
                true
            }
        }
    }
}
