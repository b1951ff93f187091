//! Geocentric planet longitudes from mean Keplerian elements.
//!
//! Elements and rates are the JPL "Approximate Positions of the Planets"
//! fit for 1800–2050 (E. M. Standish), referred to the J2000 ecliptic and
//! equinox. Accuracy is on the order of arcminutes for the inner planets
//! and a fraction of a degree for the outer ones.

use crate::angle::normalize_angle;
use crate::ephemeris::types::Body;
use crate::time::julian_centuries;

/// Light travel time for one astronomical unit, in days.
const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// General precession in longitude since J2000, arcseconds per century.
const PRECESSION_RATE: f64 = 5028.796_195;
const PRECESSION_QUADRATIC: f64 = 1.105_434_8;

/// Orbital elements at J2000 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct Elements {
    /// semi-major axis, au
    a: (f64, f64),
    /// eccentricity
    e: (f64, f64),
    /// inclination, degrees
    i: (f64, f64),
    /// mean longitude, degrees
    l: (f64, f64),
    /// longitude of perihelion, degrees
    peri: (f64, f64),
    /// longitude of the ascending node, degrees
    node: (f64, f64),
}

#[rustfmt::skip]
const MERCURY: Elements = Elements {
    a: (0.387_099_27, 0.000_000_37), e: (0.205_635_93, 0.000_019_06), i: (7.004_979_02, -0.005_947_49),
    l: (252.250_323_50, 149_472.674_111_75), peri: (77.457_796_28, 0.160_476_89), node: (48.330_765_93, -0.125_340_81),
};
#[rustfmt::skip]
const VENUS: Elements = Elements {
    a: (0.723_335_66, 0.000_003_90), e: (0.006_776_72, -0.000_041_07), i: (3.394_676_05, -0.000_788_90),
    l: (181.979_099_50, 58_517.815_387_29), peri: (131.602_467_18, 0.002_683_29), node: (76.679_842_55, -0.277_694_18),
};
#[rustfmt::skip]
const EARTH_MOON_BARYCENTER: Elements = Elements {
    a: (1.000_002_61, 0.000_005_62), e: (0.016_711_23, -0.000_043_92), i: (-0.000_015_31, -0.012_946_68),
    l: (100.464_571_66, 35_999.372_449_81), peri: (102.937_681_93, 0.323_273_64), node: (0.0, 0.0),
};
#[rustfmt::skip]
const MARS: Elements = Elements {
    a: (1.523_710_34, 0.000_018_47), e: (0.093_394_10, 0.000_078_82), i: (1.849_691_42, -0.008_131_31),
    l: (-4.553_432_05, 19_140.302_684_99), peri: (-23.943_629_59, 0.444_410_88), node: (49.559_538_91, -0.292_573_43),
};
#[rustfmt::skip]
const JUPITER: Elements = Elements {
    a: (5.202_887_00, -0.000_116_07), e: (0.048_386_24, -0.000_132_53), i: (1.304_396_95, -0.001_837_14),
    l: (34.396_440_51, 3_034.746_127_75), peri: (14.728_479_83, 0.212_526_68), node: (100.473_909_09, 0.204_691_06),
};
#[rustfmt::skip]
const SATURN: Elements = Elements {
    a: (9.536_675_94, -0.001_250_60), e: (0.053_861_79, -0.000_509_91), i: (2.485_991_87, 0.001_936_09),
    l: (49.954_244_23, 1_222.493_622_01), peri: (92.598_878_31, -0.418_972_16), node: (113.662_424_48, -0.288_677_94),
};
#[rustfmt::skip]
const URANUS: Elements = Elements {
    a: (19.189_164_64, -0.001_961_76), e: (0.047_257_44, -0.000_043_97), i: (0.772_637_83, -0.002_429_39),
    l: (313.238_104_51, 428.482_027_85), peri: (170.954_276_30, 0.408_052_81), node: (74.016_925_03, 0.042_405_89),
};
#[rustfmt::skip]
const NEPTUNE: Elements = Elements {
    a: (30.069_922_76, 0.000_262_91), e: (0.008_590_48, 0.000_051_05), i: (1.770_043_47, 0.000_353_72),
    l: (-55.120_029_69, 218.459_453_25), peri: (44.964_762_27, -0.322_414_64), node: (131.784_225_74, -0.005_086_64),
};
#[rustfmt::skip]
const PLUTO: Elements = Elements {
    a: (39.482_116_75, -0.000_315_96), e: (0.248_827_30, 0.000_051_70), i: (17.140_012_06, 0.000_048_18),
    l: (238.929_038_33, 145.207_805_15), peri: (224.068_916_29, -0.040_629_42), node: (110.303_936_84, -0.011_834_82),
};

fn elements_for(body: Body) -> Option<&'static Elements> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        Body::Sun | Body::Moon => None,
    }
}

/// Heliocentric J2000 ecliptic rectangular coordinates, au.
fn heliocentric(elements: &Elements, jd_tt: f64) -> [f64; 3] {
    let t = julian_centuries(jd_tt);
    let at = |(base, rate): (f64, f64)| base + rate * t;

    let a = at(elements.a);
    let e = at(elements.e);
    let incl = at(elements.i).to_radians();
    let peri = at(elements.peri);
    let node = at(elements.node);
    let arg_peri = (peri - node).to_radians();
    let node = node.to_radians();

    let mut mean_anomaly = normalize_angle(at(elements.l) - peri);
    if mean_anomaly > 180.0 {
        mean_anomaly -= 360.0;
    }
    let ecc_anomaly = solve_kepler(mean_anomaly.to_radians(), e);

    let x_orb = a * (ecc_anomaly.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sin_w, cos_w) = arg_peri.sin_cos();
    let (sin_o, cos_o) = node.sin_cos();
    let (sin_i, cos_i) = incl.sin_cos();

    [
        (cos_w * cos_o - sin_w * sin_o * cos_i) * x_orb + (-sin_w * cos_o - cos_w * sin_o * cos_i) * y_orb,
        (cos_w * sin_o + sin_w * cos_o * cos_i) * x_orb + (-sin_w * sin_o + cos_w * cos_o * cos_i) * y_orb,
        (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
    ]
}

/// Newton iteration on Kepler's equation, radians in and out.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..12 {
        let step = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= step;
        if step.abs() < 1e-12 {
            break;
        }
    }
    ecc
}

/// Geocentric longitude referred to the mean equinox of date.
///
/// Returns `None` for the Sun and Moon, which have their own theories.
pub fn planet_mean_equinox_longitude(body: Body, jd_tt: f64) -> Option<f64> {
    let elements = elements_for(body)?;
    let earth = heliocentric(&EARTH_MOON_BARYCENTER, jd_tt);

    // One light-time pass: where the planet was when the light left it.
    let mut delay = 0.0;
    let mut geo = [0.0; 3];
    for _ in 0..2 {
        let planet = heliocentric(elements, jd_tt - delay);
        geo = [planet[0] - earth[0], planet[1] - earth[1], planet[2] - earth[2]];
        let distance = (geo[0] * geo[0] + geo[1] * geo[1] + geo[2] * geo[2]).sqrt();
        delay = LIGHT_TIME_DAYS_PER_AU * distance;
    }

    let j2000_longitude = geo[1].atan2(geo[0]).to_degrees();
    let t = julian_centuries(jd_tt);
    let precession = (PRECESSION_RATE * t + PRECESSION_QUADRATIC * t * t) / 3600.0;
    Some(normalize_angle(j2000_longitude + precession))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kepler_circular() {
        assert!((solve_kepler(1.0, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luminaries_have_no_elements() {
        assert!(planet_mean_equinox_longitude(Body::Sun, 2_451_545.0).is_none());
        assert!(planet_mean_equinox_longitude(Body::Moon, 2_451_545.0).is_none());
    }

    #[test]
    fn test_jupiter_j2000() {
        // Almanac: Jupiter near 25.2° (Aries) at 2000-01-01
        let lon = planet_mean_equinox_longitude(Body::Jupiter, 2_451_545.0).unwrap();
        assert!((lon - 25.3).abs() < 0.5, "jupiter {lon}");
    }
}
