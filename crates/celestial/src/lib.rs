//! Natal chart engine: body longitudes, ascendant, houses, retrograde
//! motion and aspects for a birth date, time and place.

pub mod angle;
pub mod ascendant;
pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod location;
pub mod phase;
pub mod remote;
pub mod retrograde;
pub mod source;
pub mod time;
pub mod zodiac;

pub use aspects::{Aspect, AspectCalculator, AspectKind, AspectNature};
pub use chart::{
    compute_natal_chart, ChartAssembler, ChartRequest, HouseAssignment, NatalChart, Position,
    SignLabels,
};
pub use ephemeris::{AnalyticEphemeris, Body, EphemerisError, EphemerisProvider, GeoLocation};
pub use error::ChartError;
pub use houses::{compute_houses, HouseCusps, HouseError, HouseSystem, HouseSystemStrategy};
pub use location::{place_query, resolve_or_default, LocationResolver, StaticLocationResolver};
pub use phase::{MoonPhase, PhaseName};
pub use remote::{HttpEphemerisClient, RemoteEphemeris, RemoteError};
pub use retrograde::is_retrograde;
pub use source::{ChartOutcome, ChartSource};
pub use time::Instant;
pub use zodiac::{Element, ZodiacSign};
