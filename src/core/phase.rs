use serde::{Deserialize, Serialize};

use crate::{
    core::{
        diagnostics::{ValidationError, Warning},
        units::{CurrentUnit, DurationUnit, FrequencyUnit, IntervalUnit, Measure, events_per_day},
    },
    quantity::{
        charge::MilliampHours,
        time::{Hours, Seconds},
    },
};

/// One repeating activity of the device, or its idle baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub name: String,

    /// Current drawn while the phase is active.
    pub current: Measure<CurrentUnit>,

    #[serde(flatten)]
    pub kind: PhaseKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PhaseKind {
    /// Explicitly scheduled activity.
    Active {
        /// Time spent active per event.
        duration: Measure<DurationUnit>,

        repetition: Repetition,
    },

    /// Fills the time of the day left over by the active phases.
    DeepSleep,
}

/// How often an active phase repeats.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Repetition {
    Frequency { rate: f64, unit: FrequencyUnit },

    /// Fixed period between the events.
    Interval { period: f64, unit: IntervalUnit },
}

impl Repetition {
    pub fn events_per_day(self) -> f64 {
        match self {
            Self::Frequency { rate, unit } => unit.to_events_per_day(rate),
            Self::Interval { period, unit } => events_per_day(unit.to_seconds(period)),
        }
    }
}

/// Daily consumption of a single active phase.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Consumption {
    pub charge: MilliampHours,
    pub events_per_day: f64,
    pub active_time: Seconds,
}

impl Phase {
    pub const fn is_deep_sleep(&self) -> bool {
        matches!(self.kind, PhaseKind::DeepSleep)
    }

    /// Daily consumption of an active phase, [`None`] for a deep-sleep phase.
    pub fn consumption(&self) -> Option<Consumption> {
        let PhaseKind::Active { duration, repetition } = self.kind else {
            return None;
        };
        let events_per_day = repetition.events_per_day();
        Some(Consumption {
            charge: self.current.to_milliamps() * duration.to_hours() * events_per_day,
            events_per_day,
            active_time: duration.to_seconds() * events_per_day,
        })
    }

    /// Charge drawn while sleeping through the given time.
    pub fn sleep_charge(&self, sleep_time: Seconds) -> MilliampHours {
        self.current.to_milliamps() * Hours::from(sleep_time)
    }

    /// Checks the converted quantities, a finite magnitude may still overflow in conversion.
    pub(super) fn validate(&self, errors: &mut Vec<ValidationError>, warnings: &mut Vec<Warning>) {
        if !is_positive(self.current.to_milliamps().0) {
            errors.push(ValidationError::Current(self.name.clone()));
        }
        let PhaseKind::Active { duration, repetition } = self.kind else {
            return;
        };
        if !is_positive(duration.to_seconds().0) {
            errors.push(ValidationError::Duration(self.name.clone()));
        }
        match repetition {
            Repetition::Frequency { .. } => {
                if !is_positive(repetition.events_per_day()) {
                    errors.push(ValidationError::Frequency(self.name.clone()));
                }
            }
            Repetition::Interval { period, unit } => {
                let interval = unit.to_seconds(period);
                if !is_positive(interval.0) || !is_positive(repetition.events_per_day()) {
                    errors.push(ValidationError::Interval(self.name.clone()));
                } else if duration.to_seconds() > interval {
                    warnings.push(Warning::OverlappingEvents(self.name.clone()));
                }
            }
        }
    }
}

/// Constant draw that never sleeps, for example a regulator's quiescent current.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeakageCurrent {
    pub id: String,
    pub label: String,
    pub current: Measure<CurrentUnit>,
}

impl LeakageCurrent {
    pub fn daily_charge(&self) -> MilliampHours {
        self.current.to_milliamps() * Hours::ONE_DAY
    }

    pub(super) fn validate(&self, errors: &mut Vec<ValidationError>) {
        if !is_positive(self.current.to_milliamps().0) {
            errors.push(ValidationError::LeakageCurrent(self.label.clone()));
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
