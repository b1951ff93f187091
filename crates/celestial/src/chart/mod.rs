//! Assembly of complete natal charts.

pub mod assembler;
pub mod types;

pub use assembler::{compute_natal_chart, ChartAssembler};
pub use types::{
    equal_sector_house, ChartRequest, HouseAssignment, NatalChart, Position, SignLabels,
};
