use serde::{Deserialize, Serialize};

use crate::{
    core::diagnostics::ValidationError,
    quantity::{charge::MilliampHours, time::Days},
};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatteryConfig {
    /// Rated capacity.
    pub capacity: MilliampHours,

    /// Share of the rated capacity available before the cut-off voltage, `1..=100`.
    pub usable_percent: f64,

    /// Capacity lost per month without any load, `0..100`.
    ///
    /// Absent or zero disables self-discharge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_discharge_percent_per_month: Option<f64>,
}

impl BatteryConfig {
    pub fn usable_capacity(&self) -> MilliampHours {
        self.capacity * (self.usable_percent / 100.0)
    }

    pub fn self_discharge(&self) -> Option<SelfDischarge> {
        self.self_discharge_percent_per_month.and_then(SelfDischarge::from_monthly_percent)
    }

    pub(super) fn validate(&self, errors: &mut Vec<ValidationError>) {
        if !(self.capacity.0.is_finite() && self.capacity > MilliampHours::ZERO) {
            errors.push(ValidationError::Capacity);
        }
        if !(1.0..=100.0).contains(&self.usable_percent) {
            errors.push(ValidationError::UsablePercent);
        }
        if let Some(percent) = self.self_discharge_percent_per_month
            && !(0.0..100.0).contains(&percent)
        {
            errors.push(ValidationError::SelfDischarge);
        }
    }
}

/// Continuous self-discharge: `Q(t) = Q₀ · e^(−kt)`.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelfDischarge {
    /// Decay constant `k` per day.
    pub rate_per_day: f64,
}

impl SelfDischarge {
    /// Derive the decay constant from the monthly loss `r`, so that `e^(−k · 30.44) = 1 − r`.
    ///
    /// Returns [`None`] when there is no self-discharge.
    pub fn from_monthly_percent(percent: f64) -> Option<Self> {
        let ratio = percent / 100.0;
        (ratio > 0.0 && ratio < 1.0)
            .then(|| Self { rate_per_day: -(1.0 - ratio).ln() / Days::DAYS_PER_MONTH })
    }
}
