use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::{
        diagnostics::{ValidationError, Warning},
        runtime::Runtime,
    },
    quantity::{
        charge::MilliampHours,
        current::Milliamps,
        time::{Hours, Seconds},
    },
};

/// Synthetic breakdown entry for the effective self-discharge.
pub const SELF_DISCHARGE_ID: &str = "self-discharge";

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhaseResult {
    pub phase_id: String,
    pub phase_name: String,

    /// Charge drawn per day.
    pub mah_per_day: MilliampHours,

    /// Zero for the deep-sleep, leakage and self-discharge entries.
    pub events_per_day: f64,

    /// Time per day during which the phase draws its current.
    pub active_time_per_day: Seconds,
}

#[serde_as]
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResult {
    /// Active phases in the input order, then deep-sleep phases, leakage currents,
    /// and the self-discharge entry when it is significant.
    pub phase_results: Vec<PhaseResult>,

    /// Sum of all the breakdown entries, per day.
    pub total_mah_per_day: MilliampHours,

    pub average_current: Milliamps,
    pub runtime: Runtime,

    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub errors: Vec<ValidationError>,

    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub warnings: Vec<Warning>,
}

impl CalculationResult {
    /// All-zero result carrying the validation errors.
    pub fn invalid(errors: Vec<ValidationError>, warnings: Vec<Warning>) -> Self {
        Self {
            phase_results: Vec::new(),
            total_mah_per_day: MilliampHours::ZERO,
            average_current: Milliamps::ZERO,
            runtime: Runtime::ZERO,
            errors,
            warnings,
        }
    }

    pub fn from_breakdown(
        phase_results: Vec<PhaseResult>,
        runtime: Runtime,
        warnings: Vec<Warning>,
    ) -> Self {
        let total_mah_per_day =
            phase_results.iter().map(|phase_result| phase_result.mah_per_day).sum();
        Self {
            phase_results,
            total_mah_per_day,
            average_current: total_mah_per_day / Hours::ONE_DAY,
            runtime,
            errors: Vec::new(),
            warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
