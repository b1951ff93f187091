use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use celestial::chart::{ChartAssembler, ChartRequest};
use celestial::ephemeris::Body;
use celestial::houses::HouseSystem;
use celestial::remote::{RemoteChart, RemoteEphemeris, RemoteError, RemotePosition};
use celestial::{ChartError, ChartOutcome, ChartSource};

struct Offline;

#[async_trait]
impl RemoteEphemeris for Offline {
    async fn fetch_chart(&self, _request: &ChartRequest) -> Result<RemoteChart, RemoteError> {
        Err(RemoteError::Transport("connection refused".to_string()))
    }
}

/// Body *i* at 10·i + 5°, Saturn retrograde, ascendant 0°.
struct Canned;

#[async_trait]
impl RemoteEphemeris for Canned {
    async fn fetch_chart(&self, _request: &ChartRequest) -> Result<RemoteChart, RemoteError> {
        let positions: BTreeMap<Body, RemotePosition> = Body::ALL
            .into_iter()
            .enumerate()
            .map(|(i, body)| {
                let position = RemotePosition {
                    longitude: 10.0 * i as f64 + 5.0,
                    retrograde: body == Body::Saturn,
                };
                (body, position)
            })
            .collect();
        Ok(RemoteChart {
            positions,
            ascendant: 0.0,
            houses: None,
        })
    }
}

/// The first call waits on the gate; later calls fail at once.
struct Gated {
    gate: Arc<Notify>,
    calls: AtomicUsize,
}

#[async_trait]
impl RemoteEphemeris for Gated {
    async fn fetch_chart(&self, _request: &ChartRequest) -> Result<RemoteChart, RemoteError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
        }
        Err(RemoteError::Status {
            status: 503,
            body: String::new(),
        })
    }
}

fn request() -> ChartRequest {
    ChartRequest::new("1988-11-02").with_time("04:40").at(-1.29, 36.82)
}

#[tokio::test]
async fn test_local_chart_without_remote() {
    let source = ChartSource::new(ChartAssembler::default());
    let outcome = source.compute(&request()).await.unwrap();
    let local = ChartAssembler::default().compute(&request()).unwrap();
    assert_eq!(outcome, ChartOutcome::Ready(local));
    assert_eq!(source.current_generation(), 1);
}

#[tokio::test]
async fn test_remote_failure_falls_back_silently() {
    let source = ChartSource::new(ChartAssembler::default()).with_remote(Arc::new(Offline));
    let chart = source.compute(&request()).await.unwrap().into_chart().unwrap();
    assert_eq!(chart, ChartAssembler::default().compute(&request()).unwrap());
}

#[tokio::test]
async fn test_remote_answer_is_used() {
    let source = ChartSource::new(ChartAssembler::default()).with_remote(Arc::new(Canned));
    let chart = source.compute(&request()).await.unwrap().into_chart().unwrap();
    let mars = chart.position(Body::Mars).unwrap();
    assert_eq!(mars.longitude, 45.0);
    assert_eq!(mars.house, 2);
    assert!(chart.position(Body::Saturn).unwrap().retrograde);
    assert_eq!(chart.ascendant, 0.0);
    assert_eq!(chart.houses.system, HouseSystem::Equal);
    // Sun 5° and Moon 15° are ten degrees apart, outside the conjunction orb.
    assert!(chart
        .aspects
        .iter()
        .all(|a| !(a.body_a == Body::Sun && a.body_b == Body::Moon)));
}

#[tokio::test]
async fn test_invalid_input_is_surfaced_before_remote() {
    let source = ChartSource::new(ChartAssembler::default()).with_remote(Arc::new(Canned));
    let result = source.compute(&ChartRequest::new("not-a-date")).await;
    assert!(matches!(result, Err(ChartError::InvalidInput(_))));
}

#[tokio::test]
async fn test_stale_result_is_superseded() {
    let gate = Arc::new(Notify::new());
    let remote = Arc::new(Gated {
        gate: gate.clone(),
        calls: AtomicUsize::new(0),
    });
    let source = ChartSource::new(ChartAssembler::default()).with_remote(remote);

    let first = request();
    let second = request();
    let older = source.compute(&first);
    let newer = async {
        let outcome = source.compute(&second).await;
        gate.notify_one();
        outcome
    };
    let (older, newer) = tokio::join!(older, newer);

    assert!(matches!(older.unwrap(), ChartOutcome::Superseded { generation: 1 }));
    assert!(matches!(newer.unwrap(), ChartOutcome::Ready(_)));
}
