//! Configuration schema
//!
//! Configuration is stored at `~/.config/recipe-cost/config.toml`

use serde::{Deserialize, Serialize};

use crate::domain::PriceType;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How amounts are printed
    pub display: DisplayConfig,

    /// Defaults for omitted command arguments
    pub defaults: DefaultsConfig,
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Symbol printed before amounts in tables (e.g. "€", "$")
    pub currency: String,

    /// Digits after the decimal point
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: String::new(),
            decimals: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unknown format '{}'. Valid formats: table, json, csv",
                other
            )),
        }
    }
}

/// Defaults applied when a command leaves something out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Price type used by `add` without `--type`
    pub price_type: PriceType,

    /// Output format of `price` without `--format`
    pub format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            price_type: PriceType::PerKilogram,
            format: OutputFormat::Table,
        }
    }
}
