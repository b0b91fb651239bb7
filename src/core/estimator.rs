use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{
        battery::BatteryConfig,
        diagnostics::{ValidationError, Warning},
        phase::{LeakageCurrent, Phase},
        result::{CalculationResult, PhaseResult, SELF_DISCHARGE_ID},
        runtime::{self, Runtime, SELF_DISCHARGE_THRESHOLD},
    },
    prelude::*,
    quantity::{
        charge::MilliampHours,
        time::{Hours, Seconds},
    },
};

/// Daily consumption and runtime estimation over a repeating 24-hour cycle.
///
/// Pure function of the borrowed inputs: no state survives between the calls.
#[derive(Builder)]
pub struct Estimator<'a> {
    battery: &'a BatteryConfig,
    phases: &'a [Phase],

    #[builder(default)]
    leakage_currents: &'a [LeakageCurrent],
}

impl Estimator<'_> {
    #[instrument(skip_all, fields(n_phases = self.phases.len()))]
    pub fn estimate(&self) -> CalculationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        self.validate(&mut errors, &mut warnings);
        if !errors.is_empty() {
            warn!(n_errors = errors.len(), "invalid configuration");
            return CalculationResult::invalid(errors, warnings);
        }

        let mut phase_results =
            Vec::with_capacity(self.phases.len() + self.leakage_currents.len() + 1);

        let mut total_active_time = Seconds::ZERO;
        for phase in self.phases {
            let Some(consumption) = phase.consumption() else {
                continue;
            };
            debug!(%phase.id, %phase.current, ?consumption, "active phase");
            total_active_time += consumption.active_time;
            phase_results.push(PhaseResult {
                phase_id: phase.id.clone(),
                phase_name: phase.name.clone(),
                mah_per_day: consumption.charge,
                events_per_day: consumption.events_per_day,
                active_time_per_day: consumption.active_time,
            });
        }
        if total_active_time > Seconds::ONE_DAY {
            warnings.push(Warning::ActiveTimeExceedsDay(Hours::from(total_active_time)));
        }

        let sleep_time = (Seconds::ONE_DAY - total_active_time).max(Seconds::ZERO);
        for phase in self.phases.iter().filter(|phase| phase.is_deep_sleep()) {
            debug!(%phase.id, %phase.current, ?sleep_time, "deep-sleep phase");
            phase_results.push(PhaseResult {
                phase_id: phase.id.clone(),
                phase_name: phase.name.clone(),
                mah_per_day: phase.sleep_charge(sleep_time),
                events_per_day: 0.0,
                active_time_per_day: sleep_time,
            });
        }

        for leakage_current in self.leakage_currents {
            phase_results.push(PhaseResult {
                phase_id: leakage_current.id.clone(),
                phase_name: leakage_current.label.clone(),
                mah_per_day: leakage_current.daily_charge(),
                events_per_day: 0.0,
                active_time_per_day: Seconds::ONE_DAY,
            });
        }

        let daily_load: MilliampHours =
            phase_results.iter().map(|phase_result| phase_result.mah_per_day).sum();
        if !daily_load.0.is_finite() {
            warn!(%daily_load, "consumption overflow");
            return CalculationResult::invalid(vec![ValidationError::Consumption], warnings);
        }
        let solution = runtime::solve(
            self.battery.usable_capacity(),
            daily_load,
            self.battery.self_discharge(),
        );
        if solution.is_asymptotic {
            warnings.push(Warning::AsymptoticDecay);
        }
        if solution.self_discharge > SELF_DISCHARGE_THRESHOLD {
            phase_results.push(PhaseResult {
                phase_id: SELF_DISCHARGE_ID.to_string(),
                phase_name: "Self-discharge".to_string(),
                mah_per_day: solution.self_discharge,
                events_per_day: 0.0,
                active_time_per_day: Seconds::ZERO,
            });
        }

        let result = CalculationResult::from_breakdown(
            phase_results,
            Runtime::from(solution.runtime),
            warnings,
        );
        info!(
            total = %result.total_mah_per_day,
            average = %result.average_current,
            runtime = %result.runtime.days,
            n_warnings = result.warnings.len(),
            "estimated"
        );
        result
    }

    /// Collect every problem instead of stopping at the first one.
    fn validate(&self, errors: &mut Vec<ValidationError>, warnings: &mut Vec<Warning>) {
        self.battery.validate(errors);
        for phase in self.phases {
            phase.validate(errors, warnings);
        }
        for leakage_current in self.leakage_currents {
            leakage_current.validate(errors);
        }

        // Breakdown entries are correlated by id, so leakage currents share the namespace.
        let entries = self
            .phases
            .iter()
            .map(|phase| (&phase.name, &phase.id))
            .chain(self.leakage_currents.iter().map(|leakage| (&leakage.label, &leakage.id)));
        for (name, id) in entries.clone().duplicates_by(|(_, id)| *id) {
            errors.push(ValidationError::DuplicateId(name.clone(), id.clone()));
        }
        for (name, _) in entries.filter(|(_, id)| id.as_str() == SELF_DISCHARGE_ID) {
            errors.push(ValidationError::ReservedId(name.clone(), SELF_DISCHARGE_ID));
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::core::{
        phase::{PhaseKind, Repetition},
        units::{CurrentUnit, DurationUnit, FrequencyUnit, IntervalUnit, Measure},
    };

    fn battery(self_discharge: Option<f64>) -> BatteryConfig {
        BatteryConfig {
            capacity: MilliampHours(1000.0),
            usable_percent: 80.0,
            self_discharge_percent_per_month: self_discharge,
        }
    }

    fn active(id: &str, milliamps: f64, seconds: f64, per_hour: f64) -> Phase {
        Phase {
            id: id.to_string(),
            name: id.to_string(),
            current: Measure::new(milliamps, CurrentUnit::Milliamps),
            kind: PhaseKind::Active {
                duration: Measure::new(seconds, DurationUnit::Seconds),
                repetition: Repetition::Frequency { rate: per_hour, unit: FrequencyUnit::PerHour },
            },
        }
    }

    fn deep_sleep(id: &str, milliamps: f64) -> Phase {
        Phase {
            id: id.to_string(),
            name: id.to_string(),
            current: Measure::new(milliamps, CurrentUnit::Milliamps),
            kind: PhaseKind::DeepSleep,
        }
    }

    fn estimate(battery: &BatteryConfig, phases: &[Phase]) -> CalculationResult {
        Estimator::builder().battery(battery).phases(phases).build().estimate()
    }

    fn assert_total_is_sum(result: &CalculationResult) {
        let sum: f64 =
            result.phase_results.iter().map(|phase_result| phase_result.mah_per_day.0).sum();
        assert_relative_eq!(result.total_mah_per_day.0, sum, max_relative = 1e-12);
        assert!(result.total_mah_per_day >= MilliampHours::ZERO);
    }

    #[test]
    fn test_esp32_example() {
        let phases = [active("Active", 80.0, 0.2, 1.0), deep_sleep("DeepSleep", 0.01)];
        let result = estimate(&battery(Some(0.0)), &phases);

        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.phase_results.len(), 2);

        let active = &result.phase_results[0];
        assert_eq!(active.phase_id, "Active");
        assert_abs_diff_eq!(active.events_per_day, 24.0);
        assert_abs_diff_eq!(active.mah_per_day.0, 0.106_667, epsilon = 1e-6);
        assert_abs_diff_eq!(active.active_time_per_day.0, 4.8, epsilon = 1e-9);

        let sleep = &result.phase_results[1];
        assert_eq!(sleep.phase_id, "DeepSleep");
        assert_abs_diff_eq!(sleep.events_per_day, 0.0);
        assert_abs_diff_eq!(sleep.active_time_per_day.0, 86_395.2, epsilon = 1e-9);
        assert_abs_diff_eq!(sleep.mah_per_day.0, 0.239_987, epsilon = 1e-6);

        assert_abs_diff_eq!(result.total_mah_per_day.0, 0.346_653, epsilon = 1e-6);
        assert_abs_diff_eq!(result.average_current.0, 0.346_653 / 24.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.runtime.days.0, 2307.78, epsilon = 0.01);
        assert_abs_diff_eq!(result.runtime.weeks, result.runtime.days.0 / 7.0);
        assert_abs_diff_eq!(result.runtime.months, result.runtime.days.0 / 30.44);
        assert_abs_diff_eq!(result.runtime.years, result.runtime.months / 12.0);
        assert_total_is_sum(&result);
    }

    #[test]
    fn test_errors_zero_the_result() {
        let battery = BatteryConfig { capacity: MilliampHours::ZERO, ..battery(None) };
        let phases = [active("Radio", 0.0, 1.0, 0.0), deep_sleep("Sleep", 0.01)];
        let result = estimate(&battery, &phases);

        assert_eq!(
            result.errors,
            [
                ValidationError::Capacity,
                ValidationError::Current("Radio".to_string()),
                ValidationError::Frequency("Radio".to_string()),
            ]
        );
        assert!(result.phase_results.is_empty());
        assert_eq!(result.total_mah_per_day, MilliampHours::ZERO);
        assert_eq!(result.average_current.0, 0.0);
        assert_eq!(result.runtime, Runtime::ZERO);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_deep_sleep_is_clamped() {
        let phases = [
            active("Always on", 1.0, 3600.0, 1.0),
            active("Extra", 1.0, 60.0, 1.0),
            deep_sleep("Sleep", 0.01),
        ];
        let result = estimate(&battery(None), &phases);

        let sleep = &result.phase_results[2];
        assert_eq!(sleep.active_time_per_day, Seconds::ZERO);
        assert_eq!(sleep.mah_per_day, MilliampHours::ZERO);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].to_string().contains("24 hours"));
        assert_total_is_sum(&result);
    }

    #[test]
    fn test_each_deep_sleep_fills_the_remainder() {
        let phases = [
            deep_sleep("Sleep A", 0.01),
            active("Radio", 10.0, 36.0, 1.0),
            deep_sleep("Sleep B", 0.02),
        ];
        let result = estimate(&battery(None), &phases);

        let ids = result
            .phase_results
            .iter()
            .map(|phase_result| phase_result.phase_id.as_str())
            .collect_vec();
        assert_eq!(ids, ["Radio", "Sleep A", "Sleep B"]);
        assert_abs_diff_eq!(result.phase_results[1].active_time_per_day.0, 86_400.0 - 864.0);
        assert_abs_diff_eq!(result.phase_results[2].active_time_per_day.0, 86_400.0 - 864.0);
        assert_relative_eq!(
            result.phase_results[2].mah_per_day.0,
            2.0 * result.phase_results[1].mah_per_day.0,
        );
    }

    #[test]
    fn test_without_deep_sleep() {
        let result = estimate(&battery(None), &[active("Radio", 10.0, 36.0, 1.0)]);
        assert_eq!(result.phase_results.len(), 1);
        assert_abs_diff_eq!(result.total_mah_per_day.0, 2.4, epsilon = 1e-12);
        assert_abs_diff_eq!(result.runtime.days.0, 800.0 / 2.4, epsilon = 1e-9);
    }

    #[test]
    fn test_without_phases() {
        let result = estimate(&battery(None), &[]);
        assert!(result.is_valid());
        assert!(result.phase_results.is_empty());
        assert_eq!(result.runtime, Runtime::ZERO);
    }

    #[test]
    fn test_self_discharge_only() {
        let result = estimate(&battery(Some(5.0)), &[]);
        let k = -0.95_f64.ln() / 30.44;

        assert_relative_eq!(result.runtime.days.0, 100.0_f64.ln() / k, max_relative = 1e-12);
        assert_eq!(result.warnings, [Warning::AsymptoticDecay]);
        assert_eq!(result.phase_results.len(), 1);
        assert_eq!(result.phase_results[0].phase_id, SELF_DISCHARGE_ID);
        assert_relative_eq!(
            result.total_mah_per_day.0,
            800.0 / result.runtime.days.0,
            max_relative = 1e-12,
        );
    }

    #[test]
    fn test_load_and_self_discharge() {
        // 5 mAh per day exactly: 5 mA for one hour.
        let phases = [active("Radio", 5.0, 3600.0, 1.0 / 24.0)];
        let result = estimate(&battery(Some(2.0)), &phases);
        let k = -0.98_f64.ln() / 30.44;
        let expected = (1.0 / k) * (1.0 + k * 800.0 / 5.0).ln();

        assert!(result.warnings.is_empty());
        assert_relative_eq!(result.runtime.days.0, expected, max_relative = 1e-6);

        let self_discharge = result.phase_results.last().unwrap();
        assert_eq!(self_discharge.phase_id, SELF_DISCHARGE_ID);
        assert_eq!(self_discharge.phase_name, "Self-discharge");
        assert_relative_eq!(
            self_discharge.mah_per_day.0,
            800.0 / result.runtime.days.0 - 5.0,
            max_relative = 1e-9,
        );
        assert_relative_eq!(
            result.total_mah_per_day.0,
            800.0 / result.runtime.days.0,
            max_relative = 1e-9,
        );
        assert_total_is_sum(&result);
    }

    #[test]
    fn test_insignificant_self_discharge_is_hidden() {
        // Heavy load: the effective self-discharge is well below 0.001 mAh/day.
        let phases = [active("Motor", 1000.0, 3600.0, 1.0)];
        let result = estimate(&battery(Some(0.001)), &phases);
        assert_eq!(result.phase_results.len(), 1);
        assert!(result.runtime.days.0 > 0.0);
    }

    #[test]
    fn test_interval_overlap_warns() {
        let phase = Phase {
            kind: PhaseKind::Active {
                duration: Measure::new(2.0, DurationUnit::Minutes),
                repetition: Repetition::Interval { period: 60.0, unit: IntervalUnit::Seconds },
            },
            ..active("Sampler", 1.0, 1.0, 1.0)
        };
        let result = estimate(&battery(None), &[phase]);
        assert!(result.is_valid());
        assert_eq!(
            result.warnings,
            [
                Warning::OverlappingEvents("Sampler".to_string()),
                Warning::ActiveTimeExceedsDay(Hours(48.0)),
            ]
        );
        assert_abs_diff_eq!(result.phase_results[0].events_per_day, 1440.0);
    }

    #[test]
    fn test_leakage_currents() {
        let phases = [active("Radio", 10.0, 36.0, 1.0), deep_sleep("Sleep", 0.01)];
        let leakage_currents = [LeakageCurrent {
            id: "ldo".to_string(),
            label: "LDO".to_string(),
            current: Measure::new(2.0, CurrentUnit::Microamps),
        }];
        let battery = battery(None);
        let result = Estimator::builder()
            .battery(&battery)
            .phases(&phases)
            .leakage_currents(&leakage_currents)
            .build()
            .estimate();

        assert_eq!(result.phase_results.len(), 3);
        let leakage = &result.phase_results[2];
        assert_eq!(leakage.phase_name, "LDO");
        assert_abs_diff_eq!(leakage.mah_per_day.0, 0.048, epsilon = 1e-12);
        assert_eq!(leakage.active_time_per_day, Seconds::ONE_DAY);
        assert_total_is_sum(&result);
    }

    #[test]
    fn test_duplicate_ids() {
        let phases = [active("Radio", 10.0, 36.0, 1.0), deep_sleep("Radio", 0.01)];
        let result = estimate(&battery(None), &phases);
        assert_eq!(
            result.errors,
            [ValidationError::DuplicateId("Radio".to_string(), "Radio".to_string())]
        );
        assert!(result.phase_results.is_empty());
    }

    #[test]
    fn test_leakage_shares_ids_with_phases() {
        let phases = [active("ldo", 10.0, 36.0, 1.0)];
        let leakage_currents = [LeakageCurrent {
            id: "ldo".to_string(),
            label: "LDO".to_string(),
            current: Measure::new(2.0, CurrentUnit::Microamps),
        }];
        let battery = battery(None);
        let result = Estimator::builder()
            .battery(&battery)
            .phases(&phases)
            .leakage_currents(&leakage_currents)
            .build()
            .estimate();
        assert_eq!(
            result.errors,
            [ValidationError::DuplicateId("LDO".to_string(), "ldo".to_string())]
        );
        assert!(result.phase_results.is_empty());
    }

    #[test]
    fn test_self_discharge_id_is_reserved() {
        let phases = [active("Radio", 10.0, 36.0, 1.0), deep_sleep(SELF_DISCHARGE_ID, 0.01)];
        let result = estimate(&battery(Some(5.0)), &phases);
        assert_eq!(
            result.errors,
            [ValidationError::ReservedId(SELF_DISCHARGE_ID.to_string(), SELF_DISCHARGE_ID)]
        );
        assert!(result.phase_results.is_empty());
    }

    #[test]
    fn test_overflowing_conversion_is_an_error() {
        // 1e306 A overflows to infinite milliamps, and the deep sleep is clamped to zero.
        let phase = Phase {
            current: Measure::new(1e306, CurrentUnit::Amps),
            ..deep_sleep("Sleep", 0.01)
        };
        let result = estimate(&battery(None), &[active("Radio", 10.0, 7200.0, 1.0), phase]);
        assert_eq!(result.errors, [ValidationError::Current("Sleep".to_string())]);
        assert_eq!(result.total_mah_per_day, MilliampHours::ZERO);
        assert_eq!(result.runtime, Runtime::ZERO);
    }

    #[test]
    fn test_overflowing_consumption_is_an_error() {
        let phase = Phase {
            current: Measure::new(1e300, CurrentUnit::Amps),
            kind: PhaseKind::Active {
                duration: Measure::new(1e300, DurationUnit::Hours),
                repetition: Repetition::Frequency { rate: 1.0, unit: FrequencyUnit::PerHour },
            },
            ..deep_sleep("Heater", 0.01)
        };
        let result = estimate(&battery(None), &[phase]);
        assert_eq!(result.errors, [ValidationError::Consumption]);
        assert!(result.phase_results.is_empty());
        assert_eq!(result.runtime, Runtime::ZERO);
    }

    #[test]
    fn test_idempotence() {
        let phases = [active("Active", 80.0, 0.2, 1.0), deep_sleep("DeepSleep", 0.01)];
        let battery = battery(Some(3.0));
        assert_eq!(estimate(&battery, &phases), estimate(&battery, &phases));
    }
}
