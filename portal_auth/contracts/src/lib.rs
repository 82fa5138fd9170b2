use chrono::{DateTime, NaiveDateTime, Utc};

/// Decides whether a stored credential is still usable.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TokenGateService: Send + Sync + 'static {
    /// Whether the given expiry instant has been reached.
    ///
    /// The boundary is inclusive: a credential expiring exactly now is
    /// already expired.
    fn is_expired(&self, expires_at: DateTime<Utc>) -> bool;

    /// Like [`Self::is_expired`], but for a raw persisted expiry value.
    ///
    /// A value that cannot be parsed as an instant counts as expired
    /// (fail-closed); the parse failure is reported on the log channel, not
    /// to the caller.
    fn is_expired_raw(&self, raw: &str) -> bool;
}

/// Pure form of the expiry predicate: `now >= expires_at`.
pub fn expired_at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at
}

/// Parses a persisted expiry value into a UTC instant.
///
/// Accepts RFC 3339 as well as offset-less ISO 8601 timestamps; values
/// without an explicit offset are interpreted as UTC.
pub fn parse_expiration(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .or_else(|err| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|_| err)
        })
}

#[cfg(feature = "mock")]
impl MockTokenGateService {
    pub fn with_is_expired(mut self, expires_at: DateTime<Utc>, expired: bool) -> Self {
        self.expect_is_expired()
            .with(mockall::predicate::eq(expires_at))
            .return_const(expired);
        self
    }

    pub fn with_is_expired_raw(mut self, raw: String, expired: bool) -> Self {
        self.expect_is_expired_raw()
            .withf(move |arg| arg == raw)
            .return_const(expired);
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    #[test]
    fn past_and_present_instants_are_expired() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert!(expired_at(now - TimeDelta::seconds(1), now));
        assert!(expired_at(now, now));
        assert!(!expired_at(now + TimeDelta::seconds(1), now));
    }

    #[test]
    fn expiration_parses_with_and_without_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert_eq!(parse_expiration("2024-05-01T12:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_expiration("2024-05-01T14:00:00+02:00").unwrap(),
            expected
        );
        // .NET serializes `DateTime` values without an offset; treat as UTC.
        assert_eq!(parse_expiration("2024-05-01T12:00:00").unwrap(), expected);
        assert_eq!(
            parse_expiration("2024-05-01T12:00:00.0000000").unwrap(),
            expected
        );
    }

    #[test]
    fn garbage_expiration_does_not_parse() {
        assert!(parse_expiration("not-a-date").is_err());
        assert!(parse_expiration("").is_err());
    }
}
