use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::angle::{degree_within_sign, normalize_angle, sign_index};
use crate::aspects::Aspect;
use crate::ephemeris::{Body, GeoLocation};
use crate::houses::{HouseCusps, HouseSystem};
use crate::time::Instant;
use crate::zodiac::ZodiacSign;

/// How bodies are placed into houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseAssignment {
    /// Thirty-degree sectors counted from the ascendant, whatever the cusps.
    #[default]
    EqualSectors,
    /// The arc between the actual cusps.
    Cusps,
}

impl HouseAssignment {
    pub fn house_of(self, longitude: f64, ascendant: f64, houses: &HouseCusps) -> u8 {
        match self {
            HouseAssignment::EqualSectors => equal_sector_house(longitude, ascendant),
            HouseAssignment::Cusps => houses.house_of(longitude),
        }
    }
}

/// `floor(normalize(lon − asc) / 30) + 1`
pub fn equal_sector_house(longitude: f64, ascendant: f64) -> u8 {
    ((normalize_angle(longitude - ascendant) / 30.0).floor() as u8).min(11) + 1
}

/// One body's placement in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub body: Body,
    /// Ecliptic longitude, degrees in `[0, 360)`
    pub longitude: f64,
    pub sign_index: u8,
    pub sign: ZodiacSign,
    /// Degrees into the sign, two decimals
    pub degree_within_sign: f64,
    /// 1..=12
    pub house: u8,
    pub retrograde: bool,
}

impl Position {
    pub fn new(body: Body, longitude: f64, house: u8, retrograde: bool) -> Self {
        let longitude = normalize_angle(longitude);
        let index = sign_index(longitude);
        Self {
            body,
            longitude,
            sign_index: index,
            sign: ZodiacSign::from_index(index),
            degree_within_sign: degree_within_sign(longitude),
            house,
            retrograde,
        }
    }
}

/// Sun, Moon and rising signs, the headline of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignLabels {
    pub sun: ZodiacSign,
    pub moon: ZodiacSign,
    pub rising: ZodiacSign,
}

/// Inputs for one chart, as sent to the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    /// `YYYY-MM-DD`
    pub birth_date: String,
    /// `HH:MM`; noon when absent
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub house_system: HouseSystem,
}

impl ChartRequest {
    pub fn new(birth_date: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: None,
            latitude: None,
            longitude: None,
            house_system: HouseSystem::default(),
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.birth_time = Some(time.into());
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = system;
        self
    }
}

/// A computed natal chart. Recomputed wholesale whenever an input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalChart {
    pub instant: Instant,
    pub location: GeoLocation,
    /// The system asked for; `houses.system` is the one actually used.
    pub house_system: HouseSystem,
    pub positions: BTreeMap<Body, Position>,
    pub ascendant: f64,
    pub midheaven: f64,
    pub houses: HouseCusps,
    pub aspects: Vec<Aspect>,
    pub signs: SignLabels,
}

impl NatalChart {
    pub fn position(&self, body: Body) -> Option<&Position> {
        self.positions.get(&body)
    }

    /// `(body, longitude)` in chart order.
    pub fn longitudes(&self) -> Vec<(Body, f64)> {
        self.positions.values().map(|p| (p.body, p.longitude)).collect()
    }

    pub fn retrograde_bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.positions.values().filter(|p| p.retrograde).map(|p| p.body)
    }
}
