//! Classification labels attached to each plant's capacity factor.
//!
//! Flags serialize as plain strings so that the enriched dump stays readable
//! by downstream consumers:
//!
//! | Flag | Produced by |
//! |------|-------------|
//! | `No_Data` | capacity factor absent |
//! | `Normal` | deterministic rules, value in range or no rule matched |
//! | `Unusual_<Category>` | deterministic rules, value out of range |
//! | `AI_<Label>` | remote classifier override |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fuel grouping used by the deterministic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelCategory {
    Nuclear,
    Fossil,
    Hydro,
    Wind,
    Solar,
}

impl FuelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelCategory::Nuclear => "Nuclear",
            FuelCategory::Fossil => "Fossil",
            FuelCategory::Hydro => "Hydro",
            FuelCategory::Wind => "Wind",
            FuelCategory::Solar => "Solar",
        }
    }
}

impl FromStr for FuelCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Nuclear" => Ok(FuelCategory::Nuclear),
            "Fossil" => Ok(FuelCategory::Fossil),
            "Hydro" => Ok(FuelCategory::Hydro),
            "Wind" => Ok(FuelCategory::Wind),
            "Solar" => Ok(FuelCategory::Solar),
            other => Err(format!("unknown fuel category '{other}'")),
        }
    }
}

/// Label kinds accepted from the remote classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AiLabel {
    Normal,
    High(String),
    Low(String),
    Extreme(String),
    MixedFuelUnusual,
}

impl fmt::Display for AiLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiLabel::Normal => f.write_str("Normal"),
            AiLabel::High(fuel) => write!(f, "High_{fuel}"),
            AiLabel::Low(fuel) => write!(f, "Low_{fuel}"),
            AiLabel::Extreme(fuel) => write!(f, "Extreme_{fuel}"),
            AiLabel::MixedFuelUnusual => f.write_str("Mixed_Fuel_Unusual"),
        }
    }
}

impl FromStr for AiLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let fuel = |rest: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("label '{s}' names no fuel type"))
            } else {
                Ok(rest.to_string())
            }
        };
        match s {
            "Normal" => Ok(AiLabel::Normal),
            "Mixed_Fuel_Unusual" => Ok(AiLabel::MixedFuelUnusual),
            _ => {
                if let Some(rest) = s.strip_prefix("High_") {
                    fuel(rest).map(AiLabel::High)
                } else if let Some(rest) = s.strip_prefix("Low_") {
                    fuel(rest).map(AiLabel::Low)
                } else if let Some(rest) = s.strip_prefix("Extreme_") {
                    fuel(rest).map(AiLabel::Extreme)
                } else {
                    Err(format!("unknown label '{s}'"))
                }
            }
        }
    }
}

/// The single classification flag carried by a flagged plant record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CapacityFactorFlag {
    NoData,
    Normal,
    Unusual(FuelCategory),
    Ai(AiLabel),
}

impl CapacityFactorFlag {
    pub fn is_ai(&self) -> bool {
        matches!(self, CapacityFactorFlag::Ai(_))
    }
}

impl fmt::Display for CapacityFactorFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityFactorFlag::NoData => f.write_str("No_Data"),
            CapacityFactorFlag::Normal => f.write_str("Normal"),
            CapacityFactorFlag::Unusual(category) => write!(f, "Unusual_{}", category.as_str()),
            CapacityFactorFlag::Ai(label) => write!(f, "AI_{label}"),
        }
    }
}

impl FromStr for CapacityFactorFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "No_Data" => Ok(CapacityFactorFlag::NoData),
            "Normal" => Ok(CapacityFactorFlag::Normal),
            _ => {
                if let Some(label) = s.strip_prefix("AI_") {
                    label.parse().map(CapacityFactorFlag::Ai)
                } else if let Some(category) = s.strip_prefix("Unusual_") {
                    category.parse().map(CapacityFactorFlag::Unusual)
                } else {
                    Err(format!("unknown capacity factor flag '{s}'"))
                }
            }
        }
    }
}

impl TryFrom<String> for CapacityFactorFlag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CapacityFactorFlag> for String {
    fn from(flag: CapacityFactorFlag) -> Self {
        flag.to_string()
    }
}
