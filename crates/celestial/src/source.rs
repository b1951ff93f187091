use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::chart::{ChartAssembler, ChartRequest, HouseAssignment, NatalChart};
use crate::ephemeris::{EphemerisProvider, GeoLocation};
use crate::error::ChartError;
use crate::remote::RemoteEphemeris;
use crate::time::Instant;

/// Result of one chart computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Ready(NatalChart),
    /// A newer computation started before this one finished; discard it.
    Superseded { generation: u64 },
}

impl ChartOutcome {
    pub fn into_chart(self) -> Option<NatalChart> {
        match self {
            ChartOutcome::Ready(chart) => Some(chart),
            ChartOutcome::Superseded { .. } => None,
        }
    }
}

/// Computes charts, trying the remote service first when one is configured.
///
/// Every call takes a new generation number; only the most recent call's
/// result comes back as [`ChartOutcome::Ready`].
pub struct ChartSource<P> {
    assembler: ChartAssembler<P>,
    remote: Option<Arc<dyn RemoteEphemeris>>,
    generation: AtomicU64,
}

impl<P: EphemerisProvider> ChartSource<P> {
    pub fn new(assembler: ChartAssembler<P>) -> Self {
        Self {
            assembler,
            remote: None,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteEphemeris>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn assembler(&self) -> &ChartAssembler<P> {
        &self.assembler
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn compute(&self, request: &ChartRequest) -> Result<ChartOutcome, ChartError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let chart = self.compute_chart(request).await?;

        let latest = self.current_generation();
        if latest != generation {
            log::debug!("chart generation {generation} superseded by {latest}");
            return Ok(ChartOutcome::Superseded { generation });
        }
        Ok(ChartOutcome::Ready(chart))
    }

    async fn compute_chart(&self, request: &ChartRequest) -> Result<NatalChart, ChartError> {
        // Bad input is reported before any remote call.
        let instant = Instant::parse(&request.birth_date, request.birth_time.as_deref())?;
        let location = GeoLocation::new(
            request.latitude.unwrap_or(0.0),
            request.longitude.unwrap_or(0.0),
        )?;

        if let Some(remote) = &self.remote {
            match remote.fetch_chart(request).await {
                Ok(answer) => match NatalChart::from_remote(
                    &answer,
                    instant,
                    location,
                    request.house_system,
                    self.assignment(),
                ) {
                    Ok(chart) => return Ok(chart),
                    Err(e) => log::warn!("Ephemeris API answer unusable, falling back to local ephemeris: {e}"),
                },
                Err(e) => log::warn!("Ephemeris API failed, falling back to local ephemeris: {e}"),
            }
        }

        self.assembler.compute_at(instant, location, request.house_system)
    }

    fn assignment(&self) -> HouseAssignment {
        self.assembler.house_assignment()
    }
}
