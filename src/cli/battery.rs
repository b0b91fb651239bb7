//! Battery overrides on top of the profile.

use clap::Parser;

use crate::{core::battery::BatteryConfig, quantity::charge::MilliampHours};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BatteryOverrides {
    /// Rated battery capacity in milliamp-hours.
    #[clap(long = "capacity-mah", env = "BATTERY_CAPACITY_MAH")]
    pub capacity: Option<MilliampHours>,

    /// Usable share of the rated capacity, `1..=100`.
    #[clap(long, env = "BATTERY_USABLE_PERCENT")]
    pub usable_percent: Option<f64>,

    /// Capacity lost per month without any load, `0..100`. Zero disables self-discharge.
    #[clap(long, env = "BATTERY_SELF_DISCHARGE_PERCENT_PER_MONTH")]
    pub self_discharge_percent_per_month: Option<f64>,
}

impl BatteryOverrides {
    pub fn apply_to(self, mut battery: BatteryConfig) -> BatteryConfig {
        if let Some(capacity) = self.capacity {
            battery.capacity = capacity;
        }
        if let Some(usable_percent) = self.usable_percent {
            battery.usable_percent = usable_percent;
        }
        if let Some(self_discharge) = self.self_discharge_percent_per_month {
            battery.self_discharge_percent_per_month = Some(self_discharge);
        }
        battery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to() {
        let battery = BatteryConfig {
            capacity: MilliampHours(1000.0),
            usable_percent: 80.0,
            self_discharge_percent_per_month: None,
        };
        let overrides = BatteryOverrides {
            capacity: Some(MilliampHours(2000.0)),
            usable_percent: None,
            self_discharge_percent_per_month: Some(3.0),
        };
        assert_eq!(
            overrides.apply_to(battery),
            BatteryConfig {
                capacity: MilliampHours(2000.0),
                usable_percent: 80.0,
                self_discharge_percent_per_month: Some(3.0),
            }
        );
    }
}
