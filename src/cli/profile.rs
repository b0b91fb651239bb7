use std::path::PathBuf;

use clap::Parser;

use crate::{cli::battery::BatteryOverrides, prelude::*, profile::Profile};

#[derive(Parser)]
pub struct ProfileArgs {
    /// Device profile in TOML or JSON. The built-in ESP32 profile is used when omitted.
    #[clap(long, env = "DORMOUSE_PROFILE")]
    pub profile: Option<PathBuf>,

    #[clap(flatten)]
    pub battery: BatteryOverrides,
}

impl ProfileArgs {
    pub fn load(&self) -> Result<Profile> {
        let mut profile = match &self.profile {
            Some(path) => Profile::read_from(path)?,
            None => {
                info!("no profile specified, using the ESP32 preset");
                Profile::esp32()
            }
        };
        profile.battery = self.battery.apply_to(profile.battery);
        Ok(profile)
    }
}
