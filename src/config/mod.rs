//! Application configuration loaded from `gym.toml`.
//!
//! Every section is optional; anything left out falls back to the built-in defaults
//! (Basic $30, Premium $50, VIP $100, 30-day memberships, repeat bookings allowed).

/// Seed users and sessions applied at startup
pub mod seed;

use crate::{
    core::{booking::BookingPolicy, sales::Pricing},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

pub use seed::{SeedConfig, SeedSession, SeedUser};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "GYM_CONFIG";
/// Config file used when `GYM_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "gym.toml";

/// Longest membership that can be configured, in days (ten years).
pub const MAX_MEMBERSHIP_DAYS: u32 = 3650;

/// Membership settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MembershipSettings {
    /// Days a newly sold membership stays valid
    pub duration_days: u32,
}

impl Default for MembershipSettings {
    fn default() -> Self {
        Self { duration_days: 30 }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Membership prices
    pub pricing: Pricing,
    /// Membership duration
    pub membership: MembershipSettings,
    /// Booking rules
    pub booking: BookingPolicy,
    /// Users and sessions created at startup
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Checks values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        let days = self.membership.duration_days;
        if days == 0 || days > MAX_MEMBERSHIP_DAYS {
            return Err(Error::Config {
                message: format!(
                    "membership.duration_days must be between 1 and {MAX_MEMBERSHIP_DAYS}, got {days}"
                ),
            });
        }
        let prices = [self.pricing.basic, self.pricing.premium, self.pricing.vip];
        if prices.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(Error::Config {
                message: "membership prices must be non-negative numbers".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value fails validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads the configuration named by `GYM_CONFIG`, or `gym.toml`.
///
/// A missing default file is not an error; built-in defaults are used instead. A path
/// set explicitly through the environment must exist.
pub fn load_app_configuration() -> Result<AppConfig> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        info!("Loading configuration from {} ({})", path, CONFIG_PATH_ENV);
        return load_config(path);
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
        load_config(DEFAULT_CONFIG_PATH)
    } else {
        info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
        Ok(AppConfig::default())
    }
}
