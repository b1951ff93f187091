//! House division with a fixed fallback to equal houses.

pub mod strategy;
#[cfg(feature = "swisseph")]
mod swiss;
pub mod types;

pub use strategy::{
    compute_houses, compute_with, equal_cusps, strategy_for, EqualHouses, HouseContext,
    HouseSystemStrategy, PreciseHouses, WholeSignHouses, PRECISE_MAX_LATITUDE,
};
pub use types::{HouseCusps, HouseError, HouseSystem};
