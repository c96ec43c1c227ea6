//! Expiry timestamps and presence durations

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::{PresenceError, Result};

/// Far-future timestamp the service treats as "never expires".
pub const NEVER_EXPIRES: &str = "9999-12-30T23:00:00.000Z";

/// Expiry timestamp in `yyyy-MM-ddTHH:mm:ss.SSSZ` form.
///
/// An empty expiry is allowed; fields that are optional on the wire are
/// omitted for it, the rest are sent as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry(String);

impl Expiry {
    pub fn never() -> Self {
        Self(NEVER_EXPIRES.to_string())
    }

    pub fn unset() -> Self {
        Self(String::new())
    }

    pub fn at(time: DateTime<Utc>) -> Self {
        Self(time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Expiry `duration` from now. Fails if the result is not a
    /// representable timestamp.
    pub fn after(duration: Duration) -> Result<Self> {
        Utc::now()
            .checked_add_signed(duration)
            .map(Self::at)
            .ok_or_else(|| out_of_range(format!("now + {}", duration)))
    }

    /// Expiry `minutes` from now.
    pub fn after_minutes(minutes: i64) -> Result<Self> {
        let duration = Duration::try_minutes(minutes)
            .ok_or_else(|| out_of_range(format!("{} minutes", minutes)))?;
        Self::after(duration)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Expiry {
    fn default() -> Self {
        Self::never()
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Expiry {
    type Err = PresenceError;

    /// Accepts an empty string or any RFC 3339 timestamp, normalised to
    /// UTC with milliseconds. The sentinel is kept verbatim.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::unset());
        }
        if s == NEVER_EXPIRES {
            return Ok(Self::never());
        }
        let time = DateTime::parse_from_rfc3339(s).map_err(|_| {
            PresenceError::invalid_argument(
                "expiry",
                s,
                "RFC 3339 timestamp, e.g. 2024-05-01T17:00:00.000Z",
            )
        })?;
        Ok(Self::at(time.with_timezone(&Utc)))
    }
}

fn out_of_range(value: String) -> PresenceError {
    PresenceError::invalid_argument("expiry", value, "a timestamp before year 262143")
}

/// How long an endpoint presence stays active, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceDuration(u32);

impl PresenceDuration {
    pub const MIN_MINUTES: u32 = 1;
    pub const MAX_MINUTES: u32 = 240;

    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if !(Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes) {
            return Err(PresenceError::invalid_argument(
                "duration",
                minutes.to_string(),
                format!("{} to {} minutes", Self::MIN_MINUTES, Self::MAX_MINUTES),
            ));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// ISO 8601 duration, e.g. `PT60M`.
    pub fn to_iso8601(self) -> String {
        format!("PT{}M", self.0)
    }
}

impl Default for PresenceDuration {
    fn default() -> Self {
        Self(Self::MAX_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_is_sentinel() {
        assert_eq!(Expiry::default().as_str(), "9999-12-30T23:00:00.000Z");
    }

    #[test]
    fn test_expiry_at_formats_millis() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 17, 30, 0).unwrap();
        assert_eq!(Expiry::at(time).as_str(), "2024-05-01T17:30:00.000Z");
    }

    #[test]
    fn test_expiry_parse() {
        let expiry: Expiry = NEVER_EXPIRES.parse().unwrap();
        assert_eq!(expiry, Expiry::never());
        assert!("".parse::<Expiry>().unwrap().is_empty());
        assert!("tomorrow".parse::<Expiry>().is_err());
    }

    #[test]
    fn test_expiry_after_is_in_future() {
        let expiry = Expiry::after(Duration::minutes(30)).unwrap();
        let parsed = DateTime::parse_from_rfc3339(expiry.as_str()).unwrap();
        assert!(parsed.with_timezone(&Utc) > Utc::now());
    }

    #[test]
    fn test_expiry_parse_normalises_to_utc() {
        let expiry: Expiry = "2024-05-01T19:30:00+02:00".parse().unwrap();
        assert_eq!(expiry.as_str(), "2024-05-01T17:30:00.000Z");

        let expiry: Expiry = "2024-05-01T17:30:00.123456Z".parse().unwrap();
        assert_eq!(expiry.as_str(), "2024-05-01T17:30:00.123Z");
    }

    #[test]
    fn test_expiry_after_minutes_out_of_range() {
        for minutes in [i64::MAX, 1_000_000_000_000, i64::MIN] {
            let err = Expiry::after_minutes(minutes).unwrap_err();
            assert!(matches!(err, PresenceError::InvalidArgument { field: "expiry", .. }));
        }
        assert!(Expiry::after_minutes(90).is_ok());
    }

    #[test]
    fn test_duration_bounds() {
        assert!(PresenceDuration::from_minutes(0).is_err());
        assert!(PresenceDuration::from_minutes(241).is_err());
        assert_eq!(PresenceDuration::from_minutes(1).unwrap().minutes(), 1);
        assert_eq!(PresenceDuration::from_minutes(240).unwrap().minutes(), 240);
    }

    #[test]
    fn test_duration_iso8601() {
        assert_eq!(PresenceDuration::from_minutes(60).unwrap().to_iso8601(), "PT60M");
        assert_eq!(PresenceDuration::default().to_iso8601(), "PT240M");
    }
}
