use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, FixedOffset, Local, TimeDelta, Utc};
use typed_builder::TypedBuilder;

use crate::calibration::KellerRange;
use crate::prelude::*;

/// Time zone used to render packet timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZone {
    #[default]
    Utc,
    /// The zone of the running process, as the original processing did.
    Local,
    Fixed(FixedOffset),
}

impl TimeZone {
    /// Convert unix epoch seconds to a wall-clock time in this zone.
    #[must_use]
    pub fn convert(&self, secs: i32) -> DateTime<FixedOffset> {
        // i32 seconds are always well within chrono's representable range
        let utc = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(i64::from(secs));
        match self {
            TimeZone::Utc => utc.fixed_offset(),
            TimeZone::Local => utc.with_timezone(&Local).fixed_offset(),
            TimeZone::Fixed(offset) => utc.with_timezone(offset),
        }
    }
}

impl FromStr for TimeZone {
    type Err = Error;

    /// Parses `utc`, `local` or an offset such as `-07:00`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utc" | "z" => Ok(TimeZone::Utc),
            "local" => Ok(TimeZone::Local),
            _ => s
                .parse::<FixedOffset>()
                .map(TimeZone::Fixed)
                .map_err(|_| Error::TimeZone(s.to_string())),
        }
    }
}

impl Display for TimeZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeZone::Utc => write!(f, "utc"),
            TimeZone::Local => write!(f, "local"),
            TimeZone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Settings applied when assembling sensor records.
///
/// # Example
/// ```
/// use cryowurst::{DecoderConfig, KellerRange, TimeZone};
///
/// let config = DecoderConfig::builder()
///     .timezone(TimeZone::Local)
///     .keller(KellerRange::new(0.0, 100.0))
///     .build();
/// assert_eq!(config.timezone, TimeZone::Local);
/// ```
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct DecoderConfig {
    #[builder(default)]
    pub timezone: TimeZone,
    #[builder(default)]
    pub keller: KellerRange,
}
