use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::error::ChartError;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Unknown body: {name}")]
    UnknownBody { name: String },
    #[error("{body} position requested for {when}, outside the supported range {min}..={max}")]
    OutOfRange {
        body: Body,
        when: String,
        min: i32,
        max: i32,
    },
}

impl From<EphemerisError> for ChartError {
    fn from(err: EphemerisError) -> Self {
        match err {
            EphemerisError::UnknownBody { name } => ChartError::UnknownBody(name),
            other => ChartError::InvalidInput(other.to_string()),
        }
    }
}

/// The ten charted bodies, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Body::Sun => "\u{2609}",
            Body::Moon => "\u{263D}",
            Body::Mercury => "\u{263F}",
            Body::Venus => "\u{2640}",
            Body::Mars => "\u{2642}",
            Body::Jupiter => "\u{2643}",
            Body::Saturn => "\u{2644}",
            Body::Uranus => "\u{2645}",
            Body::Neptune => "\u{2646}",
            Body::Pluto => "\u{2647}",
        }
    }

    /// The luminaries never station at day granularity.
    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EphemerisError::UnknownBody {
                name: wanted.to_string(),
            })
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Degrees, north positive
    pub lat: f64,
    /// Degrees, east positive
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ChartError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ChartError::InvalidInput(format!(
                "latitude {lat} must be within [-90, 90]"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ChartError::InvalidInput(format!(
                "longitude {lon} must be within [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }
}
