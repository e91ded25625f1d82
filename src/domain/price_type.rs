use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceType {
    /// Unit price is per kilogram, quantity is in grams
    #[serde(rename = "kg", alias = "per-kilogram", alias = "per_kilogram")]
    PerKilogram,
    /// Unit price is per item, quantity is an item count
    #[serde(rename = "unit", alias = "per-unit", alias = "per_unit")]
    PerUnit,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::PerKilogram => "kg",
            PriceType::PerUnit => "unit",
        }
    }
}

impl FromStr for PriceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "per-kilogram" | "per_kilogram" => Ok(PriceType::PerKilogram),
            "unit" | "per-unit" | "per_unit" => Ok(PriceType::PerUnit),
            _ => Err(ValidationError::UnknownPriceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
