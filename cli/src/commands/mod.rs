pub mod config;
pub mod debug;
pub mod list;
pub mod pipe;
pub mod show;

use battinfo::{open_backend, Battery, DynProvider};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::UserConfig;

pub fn provider(config: &UserConfig) -> DynProvider {
    open_backend(config.backend, config.read_timeout())
}

pub fn open_battery(config: &UserConfig) -> Result<Battery> {
    Battery::with_provider(provider(config), config.battery_options())
        .wrap_err_with(|| format!("failed to open battery {}", config.index))
}
