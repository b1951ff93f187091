//! Lunar phase from the Sun–Moon elongation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::angle::{normalize_angle, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// Upper bounds (exclusive, percent of the cycle) of each phase but the last.
const PHASE_BOUNDS: [(f64, PhaseName); 7] = [
    (3.7, PhaseName::New),
    (25.0, PhaseName::WaxingCrescent),
    (28.7, PhaseName::FirstQuarter),
    (50.0, PhaseName::WaxingGibbous),
    (53.7, PhaseName::Full),
    (75.0, PhaseName::WaningGibbous),
    (78.7, PhaseName::LastQuarter),
];

impl PhaseName {
    pub fn from_cycle_percent(percent: f64) -> Self {
        PHASE_BOUNDS
            .iter()
            .find(|(bound, _)| percent < *bound)
            .map(|&(_, name)| name)
            .unwrap_or(PhaseName::WaningCrescent)
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseName::New => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::Full => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            PhaseName::New => "🌑",
            PhaseName::WaxingCrescent => "🌒",
            PhaseName::FirstQuarter => "🌓",
            PhaseName::WaxingGibbous => "🌔",
            PhaseName::Full => "🌕",
            PhaseName::WaningGibbous => "🌖",
            PhaseName::LastQuarter => "🌗",
            PhaseName::WaningCrescent => "🌘",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhase {
    pub name: PhaseName,
    /// Moon minus Sun longitude, degrees in `[0, 360)`
    pub elongation: f64,
    /// Position in the synodic cycle, 0..100
    pub cycle_percent: f64,
    /// Illuminated fraction of the disc, percent, one decimal
    pub illumination: f64,
}

impl MoonPhase {
    pub fn from_longitudes(sun: f64, moon: f64) -> Self {
        let elongation = normalize_angle(moon - sun);
        let cycle_percent = elongation / 3.6;
        let illumination = (1.0 - elongation.to_radians().cos()) / 2.0 * 100.0;
        Self {
            name: PhaseName::from_cycle_percent(cycle_percent),
            elongation,
            cycle_percent,
            illumination: round_to(illumination, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_full() {
        let new = MoonPhase::from_longitudes(100.0, 101.0);
        assert_eq!(new.name, PhaseName::New);
        assert_eq!(new.illumination, 0.0);

        let full = MoonPhase::from_longitudes(10.0, 195.0);
        assert_eq!(full.name, PhaseName::Full);
        assert!(full.illumination > 99.0);

        // 175° of elongation is still short of the full window.
        let gibbous = MoonPhase::from_longitudes(10.0, 185.0);
        assert_eq!(gibbous.name, PhaseName::WaxingGibbous);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(PhaseName::from_cycle_percent(3.69), PhaseName::New);
        assert_eq!(PhaseName::from_cycle_percent(3.7), PhaseName::WaxingCrescent);
        assert_eq!(PhaseName::from_cycle_percent(26.0), PhaseName::FirstQuarter);
        assert_eq!(PhaseName::from_cycle_percent(76.0), PhaseName::LastQuarter);
        assert_eq!(PhaseName::from_cycle_percent(78.7), PhaseName::WaningCrescent);
        assert_eq!(PhaseName::from_cycle_percent(99.9), PhaseName::WaningCrescent);
    }

    #[test]
    fn test_elongation_wraps() {
        let phase = MoonPhase::from_longitudes(350.0, 80.0);
        assert!((phase.elongation - 90.0).abs() < 1e-9);
        assert!((phase.cycle_percent - 25.0).abs() < 1e-9);
        assert_eq!(phase.name, PhaseName::FirstQuarter);
        assert_eq!(phase.illumination, 50.0);
    }
}
