//! Calculation diagnostics.
//!
//! Both kinds are ordinary data attached to the result, their display strings are the messages.

use derive_more::Display;

use crate::quantity::time::Hours;

/// Blocking problem: the result is zeroed when any is present.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ValidationError {
    #[display("Battery capacity must be greater than 0")]
    Capacity,

    #[display("Usable capacity percentage must be between 1 and 100")]
    UsablePercent,

    #[display("Self-discharge rate must be between 0 and 100 (exclusive)")]
    SelfDischarge,

    #[display("Phase \"{_0}\": Current must be greater than 0")]
    Current(String),

    #[display("Phase \"{_0}\": Duration must be greater than 0")]
    Duration(String),

    #[display("Phase \"{_0}\": Frequency must be greater than 0")]
    Frequency(String),

    #[display("Phase \"{_0}\": Interval must be greater than 0")]
    Interval(String),

    #[display("\"{_0}\": Identifier \"{_1}\" is used more than once")]
    DuplicateId(String, String),

    #[display("\"{_0}\": Identifier \"{_1}\" is reserved")]
    ReservedId(String, &'static str),

    #[display("Leakage current \"{_0}\": Current must be greater than 0")]
    LeakageCurrent(String),

    #[display("Total consumption per day is too large to estimate")]
    Consumption,
}

/// Advisory problem: the calculation proceeds.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum Warning {
    #[display("Total active time per day ({:.2} h) exceeds 24 hours. DeepSleep will be 0.", _0.0)]
    ActiveTimeExceedsDay(Hours),

    #[display("Phase \"{_0}\": Duration exceeds the interval, events will overlap")]
    OverlappingEvents(String),

    #[display(
        "Runtime calculated for self-discharge only (no load). Exponential decay is asymptotic; \
         runtime shown is time to reach 1% remaining capacity."
    )]
    AsymptoticDecay,
}
