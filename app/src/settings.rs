// In app/src/settings.rs

use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(default)]
    pub run: RunSettings,
    #[serde(default)]
    pub strategy: StrategySettings,
}

/// Broker-side run parameters; defaults mirror the classic setup
/// (100k cash, 0.2% commission, 10 units per order).
#[derive(Deserialize, Debug, Clone)]
pub struct RunSettings {
    #[serde(default = "default_starting_cash")]
    pub starting_cash: f64,
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,
    #[serde(default = "default_stake")]
    pub stake: u32,
    /// Optional inclusive date-range filter, "YYYY-MM-DD".
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StrategySettings {
    #[serde(default = "default_maperiod")]
    pub maperiod: u32,
    #[serde(default = "default_verbose_logging")]
    pub verbose_logging: bool,
}

fn default_starting_cash() -> f64 {
    100_000.0
}

fn default_commission_rate() -> f64 {
    0.002
}

fn default_stake() -> u32 {
    10
}

fn default_maperiod() -> u32 {
    21
}

fn default_verbose_logging() -> bool {
    true
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            starting_cash: default_starting_cash(),
            commission_rate: default_commission_rate(),
            stake: default_stake(),
            from_date: None,
            to_date: None,
        }
    }
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            maperiod: default_maperiod(),
            verbose_logging: default_verbose_logging(),
        }
    }
}

/// Loads the layered application settings.
///
/// 1. Starts from the defaults above.
/// 2. Merges `config/base.toml` if present.
/// 3. Merges environment variables (prefix `APP`, separator `__`).
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name("config/base").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    Ok(settings)
}
