mod report;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use celestial::chart::{ChartAssembler, ChartRequest};
use celestial::houses::HouseSystem;
use celestial::location::resolve_or_default;
use celestial::time::Instant;
use celestial::{ChartOutcome, ChartSource};

use crate::report::Report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart")]
struct Args {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Birth time, HH:MM (default from config, normally 12:00).
    #[arg(long)]
    time: Option<String>,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Birth place looked up in the config's [places] table.
    #[arg(long, conflicts_with = "lat")]
    place: Option<String>,

    /// equal, whole-sign, placidus or koch.
    #[arg(long)]
    house_system: Option<String>,

    /// Config file (default: configs/celestial.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Also list transits for this date (YYYY-MM-DD, at noon).
    #[arg(long, value_name = "DATE")]
    transits: Option<String>,

    /// Also show the Moon phase at birth.
    #[arg(long)]
    phase: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let settings = celestial_config::load_settings(args.config.as_deref())?;
    log::debug!("settings: {:?}", settings);

    let (latitude, longitude) = match (args.lat, args.lon, &args.place) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(place)) => {
            let found = resolve_or_default(&settings.location_resolver(), place).await;
            (found.lat, found.lon)
        }
        _ => (settings.chart.location.lat, settings.chart.location.lon),
    };

    let house_system: HouseSystem = match &args.house_system {
        Some(name) => name.parse()?,
        None => settings.chart.house_system,
    };

    let request = ChartRequest::new(args.date.clone())
        .with_time(args.time.clone().unwrap_or_else(|| settings.chart.birth_time.clone()))
        .at(latitude, longitude)
        .with_house_system(house_system);

    let mut source = ChartSource::new(ChartAssembler::default());
    if let Some(client) = settings.remote_client() {
        log::info!("using remote ephemeris at {}", client.url());
        source = source.with_remote(Arc::new(client));
    }

    let chart = match source.compute(&request).await? {
        ChartOutcome::Ready(chart) => chart,
        ChartOutcome::Superseded { generation } => {
            anyhow::bail!("chart computation {generation} was superseded")
        }
    };

    let transits = match &args.transits {
        Some(date) => {
            let when = Instant::parse(date, None).context("--transits")?;
            Some((when, source.assembler().transits(&chart, &when)?))
        }
        None => None,
    };

    let phase = if args.phase {
        Some(source.assembler().moon_phase(&chart.instant)?)
    } else {
        None
    };

    let report = Report::new(&chart, transits, phase);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
