//! Placidus and Koch cusps through the Swiss Ephemeris.

use swisseph::swe::houses_ex;
use swisseph::Cusp;

use crate::angle::normalize_angle;
use crate::houses::strategy::HouseContext;
use crate::houses::types::{HouseError, HouseSystem};

/// FLG_SWIEPH: tropical positions from the Swiss Ephemeris files.
const FLAGS: i32 = 2;

fn system_byte(system: HouseSystem) -> u8 {
    match system {
        HouseSystem::Placidus => b'P',
        HouseSystem::Koch => b'K',
        HouseSystem::WholeSign => b'W',
        HouseSystem::Equal => b'E',
    }
}

pub(crate) fn swiss_cusps(system: HouseSystem, ctx: &HouseContext) -> Result<[f64; 12], HouseError> {
    let jd = ctx.instant.julian_day_ut();
    let (c, _ascmc) = houses_ex(jd, FLAGS, ctx.latitude, ctx.longitude, system_byte(system) as i32);
    let cusps = Cusp::from_array(c);

    let values = [
        cusps.first, cusps.second, cusps.third, cusps.fourth,
        cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
        cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(HouseError::Numerical {
            system,
            message: "non-finite cusp".to_string(),
        });
    }
    Ok(values.map(normalize_angle))
}
