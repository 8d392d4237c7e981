use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uom::si::f64::Time;
use uom::si::ratio::ratio;
use uom::si::time::{day, hour, minute, second};

/// time unit a trip frequency is declared against on the wire. the
/// in-memory model always stores trips per hour; conversion between the
/// two runs through [`TimeUnit::per_hour_factor`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Hour,
    Minute,
    Second,
    Day,
}

impl TimeUnit {
    fn one(&self) -> Time {
        match self {
            TimeUnit::Hour => Time::new::<hour>(1.0),
            TimeUnit::Minute => Time::new::<minute>(1.0),
            TimeUnit::Second => Time::new::<second>(1.0),
            TimeUnit::Day => Time::new::<day>(1.0),
        }
    }

    /// multiplier turning a trips-per-`self` value into trips per hour.
    /// a frequency is trips-per-time rather than time-per-trip, so the
    /// conversion direction is the inverse of a plain duration
    /// conversion: one hour expressed in `self` units.
    pub fn per_hour_factor(&self) -> f64 {
        (Time::new::<hour>(1.0) / self.one()).get::<ratio>()
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Hour => write!(f, "hour"),
            TimeUnit::Minute => write!(f, "minute"),
            TimeUnit::Second => write!(f, "second"),
            TimeUnit::Day => write!(f, "day"),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hour" => Ok(TimeUnit::Hour),
            "minute" => Ok(TimeUnit::Minute),
            "second" => Ok(TimeUnit::Second),
            "day" => Ok(TimeUnit::Day),
            other => Err(format!("unrecognized time unit '{}'", other)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_per_hour_factor_inverts_duration_conversion() {
        // 3 trips per minute is 180 trips per hour
        assert_eq!(3.0 * TimeUnit::Minute.per_hour_factor(), 180.0);
        assert_eq!(2.0 * TimeUnit::Hour.per_hour_factor(), 2.0);
        // 24 trips per day is one trip per hour
        assert!((24.0 * TimeUnit::Day.per_hour_factor() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lexical_round_trip() {
        for unit in [
            TimeUnit::Hour,
            TimeUnit::Minute,
            TimeUnit::Second,
            TimeUnit::Day,
        ] {
            assert_eq!(unit.to_string().parse::<TimeUnit>(), Ok(unit));
        }
        assert!("fortnight".parse::<TimeUnit>().is_err());
    }
}
