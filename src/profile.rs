//! Device profile: the battery, the phases and the leakage currents of one device.

use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        battery::BatteryConfig,
        estimator::Estimator,
        phase::{LeakageCurrent, Phase, PhaseKind, Repetition},
        result::CalculationResult,
        units::{CurrentUnit, DurationUnit, FrequencyUnit, Measure},
    },
    prelude::*,
    quantity::charge::MilliampHours,
};

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub battery: BatteryConfig,

    #[serde(default)]
    pub phases: Vec<Phase>,

    #[serde(default)]
    pub leakage_currents: Vec<LeakageCurrent>,
}

impl Profile {
    /// ESP32 waking up once an hour for a short active burst.
    pub fn esp32() -> Self {
        Self {
            battery: BatteryConfig {
                capacity: MilliampHours(1000.0),
                usable_percent: 80.0,
                self_discharge_percent_per_month: None,
            },
            phases: vec![
                Phase {
                    id: "active-1".to_string(),
                    name: "Active".to_string(),
                    current: Measure::new(80.0, CurrentUnit::Milliamps),
                    kind: PhaseKind::Active {
                        duration: Measure::new(0.2, DurationUnit::Seconds),
                        repetition: Repetition::Frequency {
                            rate: 1.0,
                            unit: FrequencyUnit::PerHour,
                        },
                    },
                },
                Phase {
                    id: "deepsleep-1".to_string(),
                    name: "DeepSleep".to_string(),
                    current: Measure::new(0.01, CurrentUnit::Milliamps),
                    kind: PhaseKind::DeepSleep,
                },
            ],
            leakage_currents: Vec::new(),
        }
    }

    /// Read the profile, the format is chosen by the file extension.
    #[instrument]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the profile from `{}`", path.display()))?;
        let profile = match path.extension().and_then(|extension| extension.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            Some("json") => Self::from_json(&contents)?,
            _ => bail!("unsupported profile format: `{}`, expected TOML or JSON", path.display()),
        };
        info!(
            n_phases = profile.phases.len(),
            n_leakage_currents = profile.leakage_currents.len(),
            "loaded"
        );
        Ok(profile)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse the TOML profile")
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("failed to parse the JSON profile")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("failed to serialize the profile")
    }

    /// Pretty-printed JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize the profile")
    }

    pub fn estimate(&self) -> CalculationResult {
        Estimator::builder()
            .battery(&self.battery)
            .phases(&self.phases)
            .leakage_currents(&self.leakage_currents)
            .build()
            .estimate()
    }
}
