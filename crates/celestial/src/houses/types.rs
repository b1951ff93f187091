use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::angle::normalize_angle;
use crate::error::ChartError;

/// Selectable house division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseSystem {
    #[default]
    Equal,
    WholeSign,
    Placidus,
    Koch,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 4] = [
        HouseSystem::Equal,
        HouseSystem::WholeSign,
        HouseSystem::Placidus,
        HouseSystem::Koch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole-sign",
            HouseSystem::Placidus => "placidus",
            HouseSystem::Koch => "koch",
        }
    }

    /// Systems that need a precise backend rather than plain arithmetic.
    pub fn is_precise(self) -> bool {
        matches!(self, HouseSystem::Placidus | HouseSystem::Koch)
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal" => Ok(HouseSystem::Equal),
            "whole-sign" | "whole_sign" | "wholesign" => Ok(HouseSystem::WholeSign),
            "placidus" => Ok(HouseSystem::Placidus),
            "koch" => Ok(HouseSystem::Koch),
            other => Err(ChartError::invalid(format!(
                "unknown house system '{other}'. Valid systems: equal, whole-sign, placidus, koch"
            ))),
        }
    }
}

/// Twelve cusp longitudes and the system that actually produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: HouseSystem,
    pub cusps: [f64; 12],
}

impl HouseCusps {
    /// House (1..=12) whose cusp arc contains `longitude`.
    ///
    /// Arcs run from cusp *i* forward to cusp *i+1*, wrapping at 0°.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let lon = normalize_angle(longitude);
        for i in 0..12 {
            let start = self.cusps[i];
            let span = normalize_angle(self.cusps[(i + 1) % 12] - start);
            if normalize_angle(lon - start) < span {
                return i as u8 + 1;
            }
        }
        // Degenerate cusps (all equal): everything sits in the first house.
        1
    }
}

/// Reasons a house strategy could not produce cusps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HouseError {
    #[error("{system} houses need the swisseph backend, which is not compiled in")]
    Unavailable { system: HouseSystem },
    #[error("{system} houses are undefined at latitude {latitude}")]
    UnsupportedLatitude { system: HouseSystem, latitude: f64 },
    #[error("{system} house calculation failed: {message}")]
    Numerical { system: HouseSystem, message: String },
}
