//! Nutation and the obliquity of the ecliptic.
//!
//! Low-precision IAU 1980 terms (Meeus, Astronomical Algorithms ch. 22),
//! good to about half an arcsecond.

use crate::time::julian_centuries;

const ARCSEC: f64 = 1.0 / 3600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, degrees
    pub longitude: f64,
    /// Δε, degrees
    pub obliquity: f64,
}

pub fn nutation(jd_tt: f64) -> Nutation {
    let t = julian_centuries(jd_tt);
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let sun_l = (280.4665 + 36_000.7698 * t).to_radians();
    let moon_l = (218.3165 + 481_267.8813 * t).to_radians();

    let longitude = -17.20 * omega.sin() - 1.32 * (2.0 * sun_l).sin() - 0.23 * (2.0 * moon_l).sin()
        + 0.21 * (2.0 * omega).sin();
    let obliquity = 9.20 * omega.cos() + 0.57 * (2.0 * sun_l).cos() + 0.10 * (2.0 * moon_l).cos()
        - 0.09 * (2.0 * omega).cos();

    Nutation {
        longitude: longitude * ARCSEC,
        obliquity: obliquity * ARCSEC,
    }
}

/// Mean obliquity ε₀ (IAU 1980 polynomial), degrees.
pub fn mean_obliquity_deg(jd_tt: f64) -> f64 {
    let t = julian_centuries(jd_tt);
    let seconds = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + seconds * ARCSEC
}

/// True obliquity ε = ε₀ + Δε, degrees.
pub fn true_obliquity_deg(jd_tt: f64) -> f64 {
    mean_obliquity_deg(jd_tt) + nutation(jd_tt).obliquity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::J2000_JD;

    #[test]
    fn test_mean_obliquity_j2000() {
        assert!((mean_obliquity_deg(J2000_JD) - 23.439_291).abs() < 1e-6);
    }

    #[test]
    fn test_nutation_magnitude() {
        // Meeus example 22.a, 1987-04-10 0h TD: Δψ = -3.788", Δε = +9.443"
        let n = nutation(2_446_895.5);
        assert!((n.longitude * 3600.0 + 3.788).abs() < 0.5);
        assert!((n.obliquity * 3600.0 - 9.443).abs() < 0.5);
    }
}
