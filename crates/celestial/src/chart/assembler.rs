use std::collections::BTreeMap;

use crate::angle::normalize_angle;
use crate::ascendant::{ascendant, midheaven};
use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::types::{ChartRequest, HouseAssignment, NatalChart, Position, SignLabels};
use crate::ephemeris::{AnalyticEphemeris, Body, EphemerisProvider, GeoLocation};
use crate::error::ChartError;
use crate::houses::{compute_houses, HouseCusps, HouseSystem};
use crate::phase::MoonPhase;
use crate::remote::RemoteChart;
use crate::retrograde::is_retrograde;
use crate::time::Instant;
use crate::zodiac::ZodiacSign;

/// Longitude and retrograde flag per body, in [`Body::ALL`] order.
type Samples = [(f64, bool); 10];

/// Builds natal charts from an ephemeris provider.
#[derive(Debug, Clone)]
pub struct ChartAssembler<P> {
    provider: P,
    assignment: HouseAssignment,
    calculator: AspectCalculator,
}

impl Default for ChartAssembler<AnalyticEphemeris> {
    fn default() -> Self {
        Self::new(AnalyticEphemeris::new())
    }
}

impl<P: EphemerisProvider> ChartAssembler<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            assignment: HouseAssignment::default(),
            calculator: AspectCalculator::new(),
        }
    }

    pub fn with_house_assignment(mut self, assignment: HouseAssignment) -> Self {
        self.assignment = assignment;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn house_assignment(&self) -> HouseAssignment {
        self.assignment
    }

    /// Validate a request and compute its chart.
    pub fn compute(&self, request: &ChartRequest) -> Result<NatalChart, ChartError> {
        let instant = Instant::parse(&request.birth_date, request.birth_time.as_deref())?;
        let location = GeoLocation::new(
            request.latitude.unwrap_or(0.0),
            request.longitude.unwrap_or(0.0),
        )?;
        self.compute_at(instant, location, request.house_system)
    }

    pub fn compute_at(
        &self,
        instant: Instant,
        location: GeoLocation,
        house_system: HouseSystem,
    ) -> Result<NatalChart, ChartError> {
        let mut samples: Samples = [(0.0, false); 10];
        for (slot, body) in samples.iter_mut().zip(Body::ALL) {
            let longitude = self.provider.longitude_of(body, &instant)?;
            *slot = (longitude, is_retrograde(&self.provider, body, &instant));
        }

        let asc = ascendant(&instant, location.lat, location.lon);
        let houses = compute_houses(asc, house_system, location.lat, location.lon, &instant);
        log::debug!("chart for {instant} at ({}, {}): asc {asc:.2}, houses {}", location.lat, location.lon, houses.system);

        Ok(assemble(
            &self.calculator,
            self.assignment,
            instant,
            location,
            house_system,
            &samples,
            asc,
            houses,
        ))
    }

    /// Longitudes of every body at `instant`, in chart order.
    pub fn sky(&self, instant: &Instant) -> Result<Vec<(Body, f64)>, ChartError> {
        Body::ALL
            .into_iter()
            .map(|body| -> Result<(Body, f64), ChartError> { Ok((body, self.provider.longitude_of(body, instant)?)) })
            .collect()
    }

    /// Aspects from the sky at `instant` onto the natal positions.
    pub fn transits(&self, natal: &NatalChart, instant: &Instant) -> Result<Vec<Aspect>, ChartError> {
        let sky = self.sky(instant)?;
        Ok(self.calculator.cross_aspects(&sky, &natal.longitudes()))
    }

    pub fn moon_phase(&self, instant: &Instant) -> Result<MoonPhase, ChartError> {
        let sun = self.provider.longitude_of(Body::Sun, instant)?;
        let moon = self.provider.longitude_of(Body::Moon, instant)?;
        Ok(MoonPhase::from_longitudes(sun, moon))
    }
}

/// Compute a chart with the built-in analytic ephemeris.
pub fn compute_natal_chart(
    birth_date: &str,
    birth_time: Option<&str>,
    latitude: f64,
    longitude: f64,
    house_system: HouseSystem,
) -> Result<NatalChart, ChartError> {
    let instant = Instant::parse(birth_date, birth_time)?;
    let location = GeoLocation::new(latitude, longitude)?;
    ChartAssembler::default().compute_at(instant, location, house_system)
}

impl NatalChart {
    /// Build a chart from longitudes computed by the remote service.
    ///
    /// Placement, aspects and labels follow the local rules; missing house
    /// cusps are computed locally from the remote ascendant.
    pub fn from_remote(
        remote: &RemoteChart,
        instant: Instant,
        location: GeoLocation,
        house_system: HouseSystem,
        assignment: HouseAssignment,
    ) -> Result<NatalChart, ChartError> {
        let mut samples: Samples = [(0.0, false); 10];
        for (slot, body) in samples.iter_mut().zip(Body::ALL) {
            let position = remote
                .positions
                .get(&body)
                .ok_or_else(|| ChartError::invalid(format!("remote chart has no position for {body}")))?;
            *slot = (position.longitude, position.retrograde);
        }

        let asc = normalize_angle(remote.ascendant);
        let houses = match remote.houses {
            Some(cusps) => HouseCusps {
                system: house_system,
                cusps: cusps.map(normalize_angle),
            },
            None => compute_houses(asc, house_system, location.lat, location.lon, &instant),
        };

        Ok(assemble(
            &AspectCalculator::new(),
            assignment,
            instant,
            location,
            house_system,
            &samples,
            asc,
            houses,
        ))
    }
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    calculator: &AspectCalculator,
    assignment: HouseAssignment,
    instant: Instant,
    location: GeoLocation,
    house_system: HouseSystem,
    samples: &Samples,
    ascendant: f64,
    houses: HouseCusps,
) -> NatalChart {
    let positions: BTreeMap<Body, Position> = Body::ALL
        .into_iter()
        .zip(samples.iter())
        .map(|(body, &(longitude, retrograde))| {
            let house = assignment.house_of(longitude, ascendant, &houses);
            (body, Position::new(body, longitude, house, retrograde))
        })
        .collect();

    let longitudes: Vec<(Body, f64)> = positions.values().map(|p| (p.body, p.longitude)).collect();
    let aspects = calculator.aspects(&longitudes);

    let signs = SignLabels {
        sun: ZodiacSign::from_longitude(samples[0].0),
        moon: ZodiacSign::from_longitude(samples[1].0),
        rising: ZodiacSign::from_longitude(ascendant),
    };

    NatalChart {
        instant,
        location,
        house_system,
        positions,
        ascendant,
        midheaven: midheaven(&instant, location.lon),
        houses,
        aspects,
        signs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::EphemerisError;

    /// Every body at a fixed longitude, moving forward.
    struct Fixed([f64; 10]);

    impl EphemerisProvider for Fixed {
        fn longitude_of(&self, body: Body, _instant: &Instant) -> Result<f64, EphemerisError> {
            Ok(self.0[body as usize])
        }
    }

    fn fixed() -> Fixed {
        Fixed([0.0, 45.0, 60.0, 90.0, 120.0, 180.0, 200.0, 250.0, 300.0, 359.5])
    }

    #[test]
    fn test_ten_positions_in_order() {
        let assembler = ChartAssembler::new(fixed());
        let when = Instant::from_ymd_hm(1999, 3, 3, 3, 3).unwrap();
        let chart = assembler
            .compute_at(when, GeoLocation::default(), HouseSystem::Equal)
            .unwrap();
        let bodies: Vec<Body> = chart.positions.keys().copied().collect();
        assert_eq!(bodies, Body::ALL.to_vec());
        assert!(chart.retrograde_bodies().next().is_none());
        assert_eq!(chart.signs.sun, ZodiacSign::Aries);
        assert_eq!(chart.signs.moon, ZodiacSign::Taurus);
    }

    #[test]
    fn test_aspects_follow_pair_order() {
        let assembler = ChartAssembler::new(fixed());
        let when = Instant::from_ymd_hm(1999, 3, 3, 3, 3).unwrap();
        let chart = assembler
            .compute_at(when, GeoLocation::default(), HouseSystem::Equal)
            .unwrap();
        let first = &chart.aspects[0];
        // Sun 0° / Mercury 60°: the first matching pair in list order.
        assert_eq!((first.body_a, first.body_b), (Body::Sun, Body::Mercury));
        assert!(chart
            .aspects
            .iter()
            .all(|a| (a.body_a as usize) < (a.body_b as usize)));
    }

    #[test]
    fn test_invalid_request() {
        let assembler = ChartAssembler::default();
        assert!(matches!(
            assembler.compute(&ChartRequest::new("1990-13-40")),
            Err(ChartError::InvalidInput(_))
        ));
        assert!(matches!(
            assembler.compute(&ChartRequest::new("1990-01-01").at(95.0, 0.0)),
            Err(ChartError::InvalidInput(_))
        ));
    }
}
