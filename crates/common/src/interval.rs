use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Longest interval the configuration accepts (one day).
const MAX_MINUTES: u32 = 1440;

/// A bar interval, stored as whole minutes.
///
/// Parsed from strings of the form `<integer><unit>` with unit `m` or `h`
/// ("1m", "15m", "1h"). Parsing failure for a configured interval is a
/// fatal startup error, not something to recover from at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval(u32);

impl Interval {
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes == 0 || minutes > MAX_MINUTES {
            return Err(Error::Config(format!(
                "interval must be between 1 minute and {MAX_MINUTES} minutes, got {minutes}"
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn seconds(&self) -> u64 {
        u64::from(self.0) * 60
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let err = || {
            Error::Config(format!(
                "invalid interval '{s}': expected <integer>m or <integer>h, e.g. \"15m\" or \"1h\""
            ))
        };
        let mut chars = s.chars();
        let unit = chars.next_back().ok_or_else(err)?;
        let count: u32 = chars.as_str().parse().map_err(|_| err())?;
        let minutes = match unit {
            'm' => count,
            'h' => count.checked_mul(60).ok_or_else(err)?,
            _ => return Err(err()),
        };
        Self::from_minutes(minutes).map_err(|_| err())
    }
}

impl TryFrom<String> for Interval {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 60 == 0 {
            write!(f, "{}h", self.0 / 60)
        } else {
            write!(f, "{}m", self.0)
        }
    }
}
