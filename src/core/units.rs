//! Unit conversion into the canonical basis: milliamps, hours, seconds and events per day.
//!
//! Unit tags form closed enumerations: an unknown tag is rejected when a profile is parsed,
//! so every conversion below is total.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::quantity::{
    current::Milliamps,
    time::{Hours, Seconds},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurrentUnit {
    #[serde(rename = "nA")]
    Nanoamps,

    #[serde(rename = "µA", alias = "uA")]
    Microamps,

    #[serde(rename = "mA")]
    Milliamps,

    #[serde(rename = "A")]
    Amps,
}

impl CurrentUnit {
    pub fn to_milliamps(self, value: f64) -> Milliamps {
        Milliamps(match self {
            Self::Nanoamps => value / 1_000_000.0,
            Self::Microamps => value / 1000.0,
            Self::Milliamps => value,
            Self::Amps => value * 1000.0,
        })
    }
}

impl Display for CurrentUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nanoamps => write!(f, "nA"),
            Self::Microamps => write!(f, "µA"),
            Self::Milliamps => write!(f, "mA"),
            Self::Amps => write!(f, "A"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DurationUnit {
    #[serde(rename = "ms")]
    Milliseconds,

    #[serde(rename = "s")]
    Seconds,

    #[serde(rename = "min")]
    Minutes,

    #[serde(rename = "h")]
    Hours,
}

impl DurationUnit {
    pub fn to_hours(self, value: f64) -> Hours {
        Hours(match self {
            Self::Milliseconds => value / 3_600_000.0,
            Self::Seconds => value / 3600.0,
            Self::Minutes => value / 60.0,
            Self::Hours => value,
        })
    }

    pub fn to_seconds(self, value: f64) -> Seconds {
        Seconds(match self {
            Self::Milliseconds => value / 1000.0,
            Self::Seconds => value,
            Self::Minutes => value * 60.0,
            Self::Hours => value * 3600.0,
        })
    }
}

/// Repetition rate unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[serde(rename = "perHour", alias = "per-hour")]
    PerHour,

    #[serde(rename = "perDay", alias = "per-day")]
    PerDay,

    #[serde(rename = "perWeek", alias = "per-week")]
    PerWeek,
}

impl FrequencyUnit {
    pub fn to_events_per_day(self, value: f64) -> f64 {
        match self {
            Self::PerHour => value * 24.0,
            Self::PerDay => value,
            Self::PerWeek => value / 7.0,
        }
    }
}

/// Unit of a fixed period between events.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum IntervalUnit {
    #[serde(rename = "s")]
    Seconds,

    #[serde(rename = "min")]
    Minutes,

    #[serde(rename = "h")]
    Hours,
}

impl IntervalUnit {
    pub fn to_seconds(self, value: f64) -> Seconds {
        Seconds(match self {
            Self::Seconds => value,
            Self::Minutes => value * 60.0,
            Self::Hours => value * 3600.0,
        })
    }
}

/// User-entered magnitude together with its unit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measure<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Measure<U> {
    pub const fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

impl Measure<CurrentUnit> {
    pub fn to_milliamps(self) -> Milliamps {
        self.unit.to_milliamps(self.value)
    }
}

impl Measure<DurationUnit> {
    pub fn to_hours(self) -> Hours {
        self.unit.to_hours(self.value)
    }

    pub fn to_seconds(self) -> Seconds {
        self.unit.to_seconds(self.value)
    }
}

impl<U: Display> Display for Measure<U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Number of events per day for the given period, zero for a non-positive period.
pub fn events_per_day(interval: Seconds) -> f64 {
    if interval > Seconds::ZERO { Seconds::ONE_DAY / interval } else { 0.0 }
}
