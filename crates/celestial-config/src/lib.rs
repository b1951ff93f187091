use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use celestial::ephemeris::GeoLocation;
use celestial::houses::HouseSystem;
use celestial::location::StaticLocationResolver;
use celestial::remote::HttpEphemerisClient;
use celestial::time::{parse_clock, DEFAULT_TIME};

/// Tried in order when no explicit config path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/celestial.toml", "../../configs/celestial.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct CelestialSettings {
    pub chart: ChartDefaults,
    pub ephemeris_api: Option<EphemerisApiSettings>,
    /// Keyed by lower-cased place name.
    pub places: BTreeMap<String, GeoLocation>,
}

/// Values used for whatever a chart request leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDefaults {
    pub house_system: HouseSystem,
    pub birth_time: String,
    pub location: GeoLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisApiSettings {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for CelestialSettings {
    fn default() -> Self {
        Self {
            chart: ChartDefaults {
                house_system: HouseSystem::Equal,
                birth_time: DEFAULT_TIME.to_string(),
                location: GeoLocation::default(),
            },
            ephemeris_api: None,
            places: BTreeMap::new(),
        }
    }
}

impl CelestialSettings {
    pub fn location_resolver(&self) -> StaticLocationResolver {
        self.places
            .iter()
            .map(|(name, location)| (name.as_str(), *location))
            .collect()
    }

    pub fn remote_client(&self) -> Option<HttpEphemerisClient> {
        self.ephemeris_api.as_ref().map(|api| {
            let client = HttpEphemerisClient::new(api.url.clone()).with_timeout(api.timeout);
            match &api.api_key {
                Some(key) => client.with_api_key(key.clone()),
                None => client,
            }
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default = "default_birth_time")]
    birth_time: String,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            house_system: default_house_system(),
            birth_time: default_birth_time(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

fn default_house_system() -> String {
    "equal".to_string()
}

fn default_birth_time() -> String {
    DEFAULT_TIME.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisApiToml {
    url: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct PlaceToml {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    ephemeris_api: Option<EphemerisApiToml>,
    #[serde(default)]
    places: BTreeMap<String, PlaceToml>,
}

/// Try the common relative paths for `configs/celestial.toml`.
///
/// `Ok(None)` when none of them exists.
pub fn read_config_toml_text() -> anyhow::Result<Option<(PathBuf, String)>> {
    for p in DEFAULT_CONFIG_PATHS {
        let path = Path::new(p);
        if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok(Some((path.to_path_buf(), text)));
        }
    }
    Ok(None)
}

/// Load settings from `path`, or from the default locations when `None`.
///
/// A missing default file yields [`CelestialSettings::default`]; a missing
/// explicit file is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<CelestialSettings> {
    let (source, text) = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            (path.to_path_buf(), text)
        }
        None => match read_config_toml_text()? {
            Some(found) => found,
            None => return Ok(CelestialSettings::default()),
        },
    };
    parse_settings(&text).with_context(|| format!("Invalid config in {}", source.display()))
}

pub fn parse_settings(text: &str) -> anyhow::Result<CelestialSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse celestial.toml: {e}"))?;

    let chart = validate_chart(root.chart)?;
    let ephemeris_api = root.ephemeris_api.map(validate_api).transpose()?;

    let mut places = BTreeMap::new();
    for (name, place) in root.places {
        let location = GeoLocation::new(place.latitude, place.longitude)
            .map_err(|e| anyhow::anyhow!("places.\"{name}\": {e}"))?;
        places.insert(name.trim().to_lowercase(), location);
    }

    Ok(CelestialSettings {
        chart,
        ephemeris_api,
        places,
    })
}

fn validate_chart(chart: ChartToml) -> anyhow::Result<ChartDefaults> {
    let house_system: HouseSystem = chart
        .house_system
        .parse()
        .map_err(|e| anyhow::anyhow!("chart.house_system: {e}"))?;
    parse_clock(Some(&chart.birth_time)).map_err(|e| anyhow::anyhow!("chart.birth_time: {e}"))?;
    let location = GeoLocation::new(chart.latitude, chart.longitude)
        .map_err(|e| anyhow::anyhow!("chart.latitude/longitude: {e}"))?;
    Ok(ChartDefaults {
        house_system,
        birth_time: chart.birth_time.trim().to_string(),
        location,
    })
}

fn validate_api(api: EphemerisApiToml) -> anyhow::Result<EphemerisApiSettings> {
    let url = api.url.trim().to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("ephemeris_api.url must be an http(s) URL, got '{url}'");
    }
    if api.timeout_secs == 0 {
        anyhow::bail!("ephemeris_api.timeout_secs must be greater than zero");
    }
    let api_key = api.api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
    Ok(EphemerisApiSettings {
        url,
        api_key,
        timeout: Duration::from_secs(api.timeout_secs),
    })
}
