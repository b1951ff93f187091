use crate::ephemeris::lunar::moon_mean_equinox_longitude;
use crate::ephemeris::nutation::nutation;
use crate::ephemeris::planetary::planet_mean_equinox_longitude;
use crate::ephemeris::solar::sun_longitude;
use crate::ephemeris::types::{Body, EphemerisError};
use crate::angle::normalize_angle;
use crate::time::Instant;

/// Source of geocentric tropical longitudes.
pub trait EphemerisProvider: Send + Sync {
    /// Apparent ecliptic longitude of `body` at `instant`, degrees in `[0, 360)`.
    fn longitude_of(&self, body: Body, instant: &Instant) -> Result<f64, EphemerisError>;

    /// Same as [`longitude_of`](Self::longitude_of) for a body given by name.
    fn longitude_of_named(&self, name: &str, instant: &Instant) -> Result<f64, EphemerisError> {
        let body: Body = name.parse()?;
        self.longitude_of(body, instant)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn longitude_of(&self, body: Body, instant: &Instant) -> Result<f64, EphemerisError> {
        (**self).longitude_of(body, instant)
    }
}

/// Self-contained analytic ephemeris: Meeus solar theory, truncated
/// ELP-2000/82 for the Moon and JPL mean elements for the planets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn longitude_of(&self, body: Body, instant: &Instant) -> Result<f64, EphemerisError> {
        let jd = instant.julian_day_tt();
        let longitude = match body {
            // Already apparent: the solar theory folds in nutation and aberration.
            Body::Sun => return Ok(sun_longitude(jd)),
            Body::Moon => moon_mean_equinox_longitude(jd),
            planet => planet_mean_equinox_longitude(planet, jd).ok_or_else(|| {
                EphemerisError::UnknownBody {
                    name: planet.name().to_string(),
                }
            })?,
        };
        Ok(normalize_angle(longitude + nutation(jd).longitude))
    }
}
