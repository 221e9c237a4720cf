//! XML Schema `dateTime` values.
//!
//! [`XsdDateTime`] keeps the pieces of the lexical form that a plain
//! `chrono::DateTime` would lose (whether a timezone was given at all, `Z`
//! versus `+00:00` versus `-00:00`, and the fractional-second digits exactly
//! as written), so a parsed value formats back to the same string.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Digits of sub-second precision a `NaiveDateTime` can hold.
const NANO_DIGITS: u8 = 9;

/// Timezone designator of an [`XsdDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// No designator: a local time of unknown offset.
    Unspecified,
    /// The literal `Z`.
    Utc,
    /// A numeric `+hh:mm` / `-hh:mm` offset, in seconds east of UTC.
    Offset(i32),
    /// The literal `-00:00`, the same instant as `Z`.
    NegativeZero,
}

/// An XML Schema `dateTime` that round-trips its lexical form.
///
/// Fractions longer than nine digits are kept as text; the extra digits do
/// not take part in [`to_utc`](Self::to_utc).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XsdDateTime {
    local: NaiveDateTime,
    zone: Zone,
    fraction: String,
}

impl XsdDateTime {
    /// Parse a lexical `dateTime` (`YYYY-MM-DDThh:mm:ss[.fff][Z|(+|-)hh:mm]`).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidTimestamp`] when the value does not match
    /// the profile.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let invalid = |reason: &str| ModelError::InvalidTimestamp {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        if !value.is_ascii() {
            return Err(invalid("non-ASCII characters"));
        }

        let (body, zone) = split_zone(value).ok_or_else(|| invalid("bad timezone offset"))?;
        let local = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| invalid(&e.to_string()))?;

        let fraction = match body.rsplit_once('.') {
            Some((_, digits)) if !digits.contains(':') => digits.to_owned(),
            _ => String::new(),
        };

        Ok(Self {
            local,
            zone,
            fraction,
        })
    }

    /// Build a UTC value (`Z` designator) with the given fractional precision.
    ///
    /// Sub-second digits beyond `fraction_digits` (at most nine) are
    /// truncated so that the value equals what parsing its own formatted
    /// form yields.
    #[must_use]
    pub fn from_utc(instant: DateTime<Utc>, fraction_digits: u8) -> Self {
        let fraction_digits = fraction_digits.min(NANO_DIGITS);
        let naive = instant.naive_utc();
        let step = 10u32.pow(u32::from(NANO_DIGITS - fraction_digits));
        let nanos = naive.nanosecond().min(999_999_999);
        let local = naive.with_nanosecond(nanos / step * step).unwrap_or(naive);
        Self::from_parts(local, Zone::Utc, fraction_digits)
    }

    /// Build a value from a local wall-clock time and a zone designator.
    ///
    /// The fraction is written with `fraction_digits` digits, at most nine.
    #[must_use]
    pub fn from_parts(local: NaiveDateTime, zone: Zone, fraction_digits: u8) -> Self {
        let digits = usize::from(fraction_digits.min(NANO_DIGITS));
        let nanos = format!("{:09}", local.nanosecond().min(999_999_999));
        Self {
            local,
            zone,
            fraction: nanos[..digits].to_owned(),
        }
    }

    /// The current time in UTC with millisecond precision.
    #[must_use]
    pub fn now() -> Self {
        Self::from_utc(Utc::now(), 3)
    }

    /// The wall-clock part, as written.
    #[must_use]
    pub fn naive_local(&self) -> NaiveDateTime {
        self.local
    }

    /// The timezone designator, as written.
    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Number of fractional-second digits in the lexical form.
    #[must_use]
    pub fn fraction_digits(&self) -> usize {
        self.fraction.len()
    }

    /// The instant this value denotes, or `None` when no zone was given.
    #[must_use]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let offset = match self.zone {
            Zone::Unspecified => return None,
            Zone::Utc | Zone::NegativeZero => FixedOffset::east_opt(0)?,
            Zone::Offset(seconds) => FixedOffset::east_opt(seconds)?,
        };
        offset
            .from_local_datetime(&self.local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Split a lexical value into its date-time body and zone designator.
fn split_zone(value: &str) -> Option<(&str, Zone)> {
    if let Some(body) = value.strip_suffix('Z') {
        return Some((body, Zone::Utc));
    }

    let bytes = value.as_bytes();
    if bytes.len() < 6 {
        return Some((value, Zone::Unspecified));
    }

    let split = bytes.len() - 6;
    let sign = match bytes[split] {
        b'+' => 1,
        b'-' => -1,
        _ => return Some((value, Zone::Unspecified)),
    };
    // A date-only tail like "-01-01" has no colon at this position.
    if bytes[split + 3] != b':' {
        return Some((value, Zone::Unspecified));
    }

    let hours: i32 = value[split + 1..split + 3].parse().ok()?;
    let minutes: i32 = value[split + 4..].parse().ok()?;
    if hours > 14 || minutes > 59 || (hours == 14 && minutes != 0) {
        return None;
    }

    let seconds = sign * (hours * 3600 + minutes * 60);
    let zone = if seconds == 0 && sign < 0 {
        Zone::NegativeZero
    } else {
        Zone::Offset(seconds)
    };
    Some((&value[..split], zone))
}

impl fmt::Display for XsdDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%dT%H:%M:%S"))?;

        if !self.fraction.is_empty() {
            write!(f, ".{}", self.fraction)?;
        }

        match self.zone {
            Zone::Unspecified => Ok(()),
            Zone::Utc => f.write_str("Z"),
            Zone::NegativeZero => f.write_str("-00:00"),
            Zone::Offset(seconds) => {
                let sign = if seconds < 0 { '-' } else { '+' };
                let abs = seconds.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}

impl FromStr for XsdDateTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for XsdDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for XsdDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
