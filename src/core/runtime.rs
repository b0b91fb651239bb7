use serde::Serialize;

use crate::{
    core::battery::SelfDischarge,
    quantity::{charge::MilliampHours, time::Days},
};

/// Reported self-discharge below this daily charge is left out of the breakdown.
pub const SELF_DISCHARGE_THRESHOLD: MilliampHours = MilliampHours(0.001);

/// Remaining capacity share at which a pure exponential decay counts as depleted.
const DEPLETION_THRESHOLD: f64 = 0.01;

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Solution {
    pub runtime: Days,

    /// Effective average self-discharge per day.
    ///
    /// Back-derived from the closed-form runtime as `Q₀ / t − L`. It is a display figure,
    /// not an independently integrated quantity.
    pub self_discharge: MilliampHours,

    /// The runtime is the time to reach [`DEPLETION_THRESHOLD`], since the decay never ends.
    pub is_asymptotic: bool,
}

/// Solve the time to deplete the usable capacity `Q₀` under the constant daily load `L`.
///
/// With self-discharge, `dQ/dt = −L − kQ`, which gives `Q(t) = Q₀e^(−kt) − (L/k)(1 − e^(−kt))`
/// and `Q(t) = 0` at `t = ln(1 + kQ₀/L) / k`. Without load, the time to reach 1% is
/// `ln(100) / k`. Without self-discharge, the discharge is linear.
pub fn solve(
    usable_capacity: MilliampHours,
    daily_load: MilliampHours,
    self_discharge: Option<SelfDischarge>,
) -> Solution {
    let Some(SelfDischarge { rate_per_day: k }) = self_discharge else {
        return Solution {
            runtime: if daily_load > MilliampHours::ZERO {
                Days(usable_capacity / daily_load)
            } else {
                Days::ZERO
            },
            self_discharge: MilliampHours::ZERO,
            is_asymptotic: false,
        };
    };

    if daily_load > MilliampHours::ZERO {
        let runtime = Days((k * usable_capacity.0 / daily_load.0).ln_1p() / k);
        Solution {
            runtime,
            self_discharge: (usable_capacity / runtime.0 - daily_load).max(MilliampHours::ZERO),
            is_asymptotic: false,
        }
    } else {
        let runtime = Days(-DEPLETION_THRESHOLD.ln() / k);
        Solution { runtime, self_discharge: usable_capacity / runtime.0, is_asymptotic: true }
    }
}

/// Runtime expressed in calendar units.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Runtime {
    pub days: Days,
    pub weeks: f64,
    pub months: f64,
    pub years: f64,
}

impl Runtime {
    pub const ZERO: Self = Self { days: Days::ZERO, weeks: 0.0, months: 0.0, years: 0.0 };
}

impl From<Days> for Runtime {
    fn from(days: Days) -> Self {
        Self { days, weeks: days.to_weeks(), months: days.to_months(), years: days.to_years() }
    }
}
