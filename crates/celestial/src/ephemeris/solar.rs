//! Apparent geocentric longitude of the Sun (Meeus ch. 25, ~0.01°).

use crate::angle::normalize_angle;
use crate::time::julian_centuries;

/// Apparent longitude of the Sun, degrees of date.
pub fn sun_longitude(jd_tt: f64) -> f64 {
    let t = julian_centuries(jd_tt);
    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_longitude = mean_longitude + center;
    let omega = (125.04 - 1934.136 * t).to_radians();
    normalize_angle(true_longitude - 0.005_69 - 0.004_78 * omega.sin())
}
