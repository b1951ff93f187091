pub mod lunar;
pub mod nutation;
pub mod planetary;
pub mod provider;
pub mod solar;
pub mod types;

pub use nutation::{mean_obliquity_deg, nutation, true_obliquity_deg, Nutation};
pub use provider::{AnalyticEphemeris, EphemerisProvider};
pub use types::{Body, EphemerisError, GeoLocation};
