//! Optional hosted ephemeris service.
//!
//! The service receives a [`ChartRequest`] as JSON and answers with body
//! longitudes and an ascendant. Every failure here is recoverable: callers
//! fall back to the local engine.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use crate::chart::ChartRequest;
use crate::ephemeris::Body;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Ephemeris API error: {status} {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected ephemeris API response shape: {0}")]
    Shape(String),
    #[error("Ephemeris API response has no position for {0}")]
    MissingBody(Body),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemotePosition {
    pub longitude: f64,
    pub retrograde: bool,
}

/// A normalized remote answer with all ten bodies present.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteChart {
    pub positions: BTreeMap<Body, RemotePosition>,
    pub ascendant: f64,
    pub houses: Option<[f64; 12]>,
}

/// Accepts `{positions, ascendant, houses?}` or the same object under `data`.
///
/// Positions are keyed by body name and are either a bare longitude or a
/// `{longitude, retrograde}` object. Unrecognised keys are skipped.
pub fn parse_remote_payload(json: &Value) -> Result<RemoteChart, RemoteError> {
    let root = if json.get("positions").is_some() && json.get("ascendant").is_some() {
        json
    } else if json.get("data").and_then(|d| d.get("positions")).is_some() {
        &json["data"]
    } else {
        return Err(RemoteError::Shape("expected positions and ascendant".to_string()));
    };

    let entries = root["positions"]
        .as_object()
        .ok_or_else(|| RemoteError::Shape("positions is not an object".to_string()))?;

    let mut positions = BTreeMap::new();
    for (key, value) in entries {
        let body: Body = match key.parse() {
            Ok(body) => body,
            Err(_) => {
                log::debug!("ignoring remote position '{key}'");
                continue;
            }
        };
        positions.insert(body, parse_position(key, value)?);
    }
    if let Some(missing) = Body::ALL.into_iter().find(|b| !positions.contains_key(b)) {
        return Err(RemoteError::MissingBody(missing));
    }

    let ascendant = root["ascendant"]
        .as_f64()
        .filter(|a| a.is_finite())
        .ok_or_else(|| RemoteError::Shape("ascendant is not a number".to_string()))?;

    Ok(RemoteChart {
        positions,
        ascendant,
        houses: parse_houses(&root["houses"]),
    })
}

fn parse_position(key: &str, value: &Value) -> Result<RemotePosition, RemoteError> {
    let (longitude, retrograde) = match value {
        Value::Number(n) => (n.as_f64(), false),
        Value::Object(fields) => (
            fields.get("longitude").and_then(Value::as_f64),
            fields.get("retrograde").and_then(Value::as_bool).unwrap_or(false),
        ),
        _ => (None, false),
    };
    match longitude {
        Some(longitude) if longitude.is_finite() => Ok(RemotePosition { longitude, retrograde }),
        _ => Err(RemoteError::Shape(format!("position '{key}' has no longitude"))),
    }
}

/// Twelve numeric cusps, or nothing.
fn parse_houses(value: &Value) -> Option<[f64; 12]> {
    let list = value.as_array()?;
    if list.len() != 12 {
        log::debug!("ignoring remote houses with {} cusps", list.len());
        return None;
    }
    let mut cusps = [0.0; 12];
    for (slot, v) in cusps.iter_mut().zip(list) {
        *slot = v.as_f64().filter(|c| c.is_finite())?;
    }
    Some(cusps)
}

/// A service that computes charts remotely.
#[async_trait]
pub trait RemoteEphemeris: Send + Sync {
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<RemoteChart, RemoteError>;
}

/// POSTs chart requests to a hosted ephemeris over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEphemerisClient {
    url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpEphemerisClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sent as `Authorization: Bearer <key>`.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn post_blocking(&self, body: &str) -> Result<Value, RemoteError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let mut request = agent.post(&self.url).set("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.set("Authorization", &format!("Bearer {key}"));
        }

        let text = match request.send_string(body) {
            Ok(response) => response
                .into_string()
                .map_err(|e| RemoteError::Transport(format!("Read error: {e}")))?,
            Err(ureq::Error::Status(status, response)) => {
                return Err(RemoteError::Status {
                    status,
                    body: response.into_string().unwrap_or_default(),
                })
            }
            Err(e) => return Err(RemoteError::Transport(e.to_string())),
        };
        serde_json::from_str(&text).map_err(|e| RemoteError::Shape(format!("JSON error: {e}")))
    }
}

#[async_trait]
impl RemoteEphemeris for HttpEphemerisClient {
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<RemoteChart, RemoteError> {
        let body = serde_json::to_string(request).map_err(|e| RemoteError::Shape(e.to_string()))?;
        let client = self.clone();
        let json = tokio::task::spawn_blocking(move || client.post_blocking(&body))
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))??;
        parse_remote_payload(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn all_bodies(value: impl Fn(usize) -> Value) -> Value {
        let mut map = serde_json::Map::new();
        for (i, body) in Body::ALL.into_iter().enumerate() {
            map.insert(body.name().to_string(), value(i));
        }
        Value::Object(map)
    }

    #[test]
    fn test_flat_shape_with_numbers() {
        let payload = json!({
            "positions": all_bodies(|i| json!(i as f64 * 30.0 + 1.0)),
            "ascendant": 123.4,
        });
        let chart = parse_remote_payload(&payload).unwrap();
        assert_eq!(chart.positions[&Body::Mars].longitude, 121.0);
        assert!(!chart.positions[&Body::Mars].retrograde);
        assert_eq!(chart.ascendant, 123.4);
        assert!(chart.houses.is_none());
    }

    #[test]
    fn test_nested_data_shape_with_objects() {
        let payload = json!({
            "data": {
                "positions": all_bodies(|i| json!({"longitude": 10.0 * i as f64, "retrograde": i == 6})),
                "ascendant": 5.0,
                "houses": (0..12).map(|i| 5.0 + 30.0 * i as f64).collect::<Vec<_>>(),
            }
        });
        let chart = parse_remote_payload(&payload).unwrap();
        assert!(chart.positions[&Body::Saturn].retrograde);
        assert_eq!(chart.houses.map(|h| h[1]), Some(35.0));
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let mut positions = all_bodies(|_| json!(1.0));
        positions.as_object_mut().unwrap().remove("Pluto");
        let payload = json!({"positions": positions, "ascendant": 1.0});
        assert_eq!(
            parse_remote_payload(&payload),
            Err(RemoteError::MissingBody(Body::Pluto))
        );
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(matches!(
            parse_remote_payload(&json!({"result": []})),
            Err(RemoteError::Shape(_))
        ));
        let payload = json!({"positions": all_bodies(|_| json!("north")), "ascendant": 1.0});
        assert!(matches!(parse_remote_payload(&payload), Err(RemoteError::Shape(_))));
    }

    #[test]
    fn test_extra_points_are_ignored() {
        let mut positions = all_bodies(|_| json!(2.0));
        positions.as_object_mut().unwrap().insert("Chiron".to_string(), json!(3.0));
        let payload = json!({"positions": positions, "ascendant": 1.0, "houses": [1, 2]});
        let chart = parse_remote_payload(&payload).unwrap();
        assert_eq!(chart.positions.len(), 10);
        assert!(chart.houses.is_none());
    }
}
