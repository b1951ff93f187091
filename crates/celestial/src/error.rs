use thiserror::Error;

/// Errors surfaced to callers of the chart engine.
///
/// Everything else (retrograde sampling, precise houses, the remote
/// service) degrades to a fallback value instead of failing the chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown body: {0}. Valid bodies: Sun, Moon, Mercury, Venus, Mars, Jupiter, Saturn, Uranus, Neptune, Pluto")]
    UnknownBody(String),
}

impl ChartError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ChartError::InvalidInput(message.into())
    }
}
