use crate::angle::normalize_angle;
use crate::houses::types::{HouseCusps, HouseError, HouseSystem};
use crate::time::Instant;

/// Polar circle; precise quadrant systems break down beyond it.
pub const PRECISE_MAX_LATITUDE: f64 = 66.5;

/// Everything a house strategy may need.
#[derive(Debug, Clone, Copy)]
pub struct HouseContext {
    pub ascendant: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub instant: Instant,
}

/// One way of dividing the ecliptic into twelve houses.
pub trait HouseSystemStrategy: Send + Sync {
    fn system(&self) -> HouseSystem;

    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; 12], HouseError>;
}

/// Thirty-degree houses starting at the ascendant.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualHouses;

impl HouseSystemStrategy for EqualHouses {
    fn system(&self) -> HouseSystem {
        HouseSystem::Equal
    }

    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; 12], HouseError> {
        Ok(equal_cusps(ctx.ascendant))
    }
}

/// Houses aligned with the signs, the first being the rising sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeSignHouses;

impl HouseSystemStrategy for WholeSignHouses {
    fn system(&self) -> HouseSystem {
        HouseSystem::WholeSign
    }

    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; 12], HouseError> {
        let first = (normalize_angle(ctx.ascendant) / 30.0).floor() as usize;
        Ok(std::array::from_fn(|i| normalize_angle(30.0 * ((first + i) % 12) as f64)))
    }
}

/// Placidus or Koch cusps from the Swiss Ephemeris.
///
/// Without the `swisseph` feature this always reports
/// [`HouseError::Unavailable`].
#[derive(Debug, Clone, Copy)]
pub struct PreciseHouses {
    system: HouseSystem,
}

impl PreciseHouses {
    pub fn new(system: HouseSystem) -> Self {
        Self { system }
    }

    pub fn is_available() -> bool {
        cfg!(feature = "swisseph")
    }
}

impl HouseSystemStrategy for PreciseHouses {
    fn system(&self) -> HouseSystem {
        self.system
    }

    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; 12], HouseError> {
        if ctx.latitude.abs() > PRECISE_MAX_LATITUDE {
            return Err(HouseError::UnsupportedLatitude {
                system: self.system,
                latitude: ctx.latitude,
            });
        }
        #[cfg(feature = "swisseph")]
        {
            crate::houses::swiss::swiss_cusps(self.system, ctx)
        }
        #[cfg(not(feature = "swisseph"))]
        {
            Err(HouseError::Unavailable { system: self.system })
        }
    }
}

pub fn equal_cusps(ascendant: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_angle(ascendant + 30.0 * i as f64))
}

/// The strategy that handles `system`.
pub fn strategy_for(system: HouseSystem) -> Box<dyn HouseSystemStrategy> {
    match system {
        HouseSystem::Equal => Box::new(EqualHouses),
        HouseSystem::WholeSign => Box::new(WholeSignHouses),
        HouseSystem::Placidus | HouseSystem::Koch => Box::new(PreciseHouses::new(system)),
    }
}

/// Twelve cusps under `system`, falling back to equal houses when the
/// requested system cannot be computed.
pub fn compute_houses(
    ascendant: f64,
    system: HouseSystem,
    latitude: f64,
    longitude: f64,
    instant: &Instant,
) -> HouseCusps {
    let ctx = HouseContext {
        ascendant,
        latitude,
        longitude,
        instant: *instant,
    };
    compute_with(strategy_for(system).as_ref(), &ctx)
}

/// Run one strategy, degrading to equal houses on failure.
pub fn compute_with(strategy: &dyn HouseSystemStrategy, ctx: &HouseContext) -> HouseCusps {
    match strategy.cusps(ctx) {
        Ok(cusps) => HouseCusps {
            system: strategy.system(),
            cusps,
        },
        Err(e) => {
            log::warn!("{e}; using equal houses");
            HouseCusps {
                system: HouseSystem::Equal,
                cusps: equal_cusps(ctx.ascendant),
            }
        }
    }
}
