//! Configuration management for payledger

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct LedgerConfig {
    /// Fixed display IBAN for the emission account; generated when absent
    #[serde(default)]
    pub emission_iban: Option<String>,
    /// Fixed display IBAN for the destruction account; generated when absent
    #[serde(default)]
    pub destruction_iban: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_emission_amount")]
    pub emission_amount: f64,
    #[serde(default = "default_transfer_amount")]
    pub transfer_amount: f64,
    #[serde(default = "default_destroy_amount")]
    pub destroy_amount: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            emission_amount: default_emission_amount(),
            transfer_amount: default_transfer_amount(),
            destroy_amount: default_destroy_amount(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

/// Load configuration from the given path, falling back to defaults when
/// the file is absent
pub fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = fs::read_to_string(path).unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        Config::default()
    } else {
        toml::from_str(&config_str)?
    };

    // Validate critical values
    if config.demo.emission_amount < 0.0 {
        return Err("demo.emission_amount must be non-negative".into());
    }

    Ok(config)
}

fn default_emission_amount() -> f64 {
    1000.0
}

fn default_transfer_amount() -> f64 {
    100.0
}

fn default_destroy_amount() -> f64 {
    10.0
}
