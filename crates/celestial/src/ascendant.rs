//! Sidereal time and the chart angles (Ascendant, Midheaven).

use crate::angle::normalize_angle;
use crate::ephemeris::true_obliquity_deg;
use crate::time::{julian_centuries, Instant, J2000_JD};

/// Latitudes are clamped here; the tangent term degenerates at the poles.
pub const MAX_ABS_LATITUDE: f64 = 89.9;

/// Greenwich Mean Sidereal Time in degrees (Meeus eq. 12.4), from JD UT.
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    normalize_angle(
        280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time for an east-positive longitude, degrees.
pub fn local_sidereal_time_deg(gmst: f64, longitude_east: f64) -> f64 {
    normalize_angle(gmst + longitude_east)
}

/// Ascendant longitude from local sidereal time, latitude and obliquity.
///
/// `atan2(−cos LST, sin LST·sin φ + tan ε·cos φ)`, normalized.
pub fn ascendant_from_lst(lst: f64, latitude: f64, obliquity: f64) -> f64 {
    let lst = lst.to_radians();
    let phi = latitude.clamp(-MAX_ABS_LATITUDE, MAX_ABS_LATITUDE).to_radians();
    let eps = obliquity.to_radians();

    let asc = f64::atan2(-lst.cos(), lst.sin() * phi.sin() + eps.tan() * phi.cos());
    normalize_angle(asc.to_degrees())
}

/// Midheaven longitude from local sidereal time and obliquity.
pub fn midheaven_from_lst(lst: f64, obliquity: f64) -> f64 {
    let lst = lst.to_radians();
    let eps = obliquity.to_radians();
    normalize_angle(f64::atan2(lst.sin(), lst.cos() * eps.cos()).to_degrees())
}

fn lst_and_obliquity(instant: &Instant, longitude: f64) -> (f64, f64) {
    let lst = local_sidereal_time_deg(gmst_deg(instant.julian_day_ut()), longitude);
    (lst, true_obliquity_deg(instant.julian_day_tt()))
}

/// Ecliptic longitude rising on the eastern horizon.
pub fn ascendant(instant: &Instant, latitude: f64, longitude: f64) -> f64 {
    let (lst, eps) = lst_and_obliquity(instant, longitude);
    ascendant_from_lst(lst, latitude, eps)
}

/// Ecliptic longitude culminating on the local meridian.
pub fn midheaven(instant: &Instant, longitude: f64) -> f64 {
    let (lst, eps) = lst_and_obliquity(instant, longitude);
    midheaven_from_lst(lst, eps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.439_291;

    #[test]
    fn test_gmst_meeus_example_12a() {
        // 1987-04-10 0h UT: GMST = 13h10m46.3668s = 197.693195°
        assert!((gmst_deg(2_446_895.5) - 197.693_195).abs() < 1e-4);
    }

    #[test]
    fn test_gmst_j2000_noon() {
        assert!((gmst_deg(J2000_JD) - 280.460_618_37).abs() < 1e-8);
    }

    #[test]
    fn test_lst_wraps() {
        assert!((local_sidereal_time_deg(350.0, 20.0) - 10.0).abs() < 1e-12);
        assert!((local_sidereal_time_deg(10.0, -20.0) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn test_ascendant_equator_quadrants() {
        // φ = 0 reduces the formula to atan2(−cos LST, tan ε).
        assert!((ascendant_from_lst(0.0, 0.0, EPS) - (270.0 + EPS)).abs() < 1e-9);
        assert!((ascendant_from_lst(180.0, 0.0, EPS) - (90.0 - EPS)).abs() < 1e-9);
        let at_90 = ascendant_from_lst(90.0, 0.0, EPS);
        assert!(at_90 < 1e-9 || at_90 > 360.0 - 1e-9, "asc {at_90}");
        // tan ε > 0 keeps the equatorial ascendant within 90° of 0°.
        let at_270 = ascendant_from_lst(270.0, 0.0, EPS);
        assert!(at_270 < 1e-9 || at_270 > 360.0 - 1e-9, "asc {at_270}");
    }

    #[test]
    fn test_ascendant_polar_latitude_is_clamped() {
        let at_pole = ascendant_from_lst(45.0, 90.0, EPS);
        let clamped = ascendant_from_lst(45.0, MAX_ABS_LATITUDE, EPS);
        assert_eq!(at_pole, clamped);
        assert!((0.0..360.0).contains(&at_pole));
    }

    #[test]
    fn test_midheaven_cardinal_points() {
        assert!(midheaven_from_lst(0.0, EPS).abs() < 1e-9);
        assert!((midheaven_from_lst(90.0, EPS) - 90.0).abs() < 1e-9);
        assert!((midheaven_from_lst(180.0, EPS) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_ascendant_is_deterministic_and_in_range() {
        let when = Instant::from_ymd_hm(2000, 1, 1, 12, 0).unwrap();
        let a = ascendant(&when, 51.48, -0.0015);
        let b = ascendant(&when, 51.48, -0.0015);
        assert_eq!(a.to_bits(), b.to_bits());
        assert!((0.0..360.0).contains(&a));
    }
}
