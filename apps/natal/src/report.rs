use serde::Serialize;
use std::fmt;

use celestial::aspects::Aspect;
use celestial::chart::NatalChart;
use celestial::phase::MoonPhase;
use celestial::time::Instant;
use celestial::zodiac::ZodiacSign;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transits {
    pub instant: Instant,
    pub aspects: Vec<Aspect>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub chart: &'a NatalChart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transits: Option<Transits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_phase: Option<MoonPhase>,
}

impl<'a> Report<'a> {
    pub fn new(
        chart: &'a NatalChart,
        transits: Option<(Instant, Vec<Aspect>)>,
        moon_phase: Option<MoonPhase>,
    ) -> Self {
        Self {
            chart,
            transits: transits.map(|(instant, aspects)| Transits { instant, aspects }),
            moon_phase,
        }
    }
}

fn format_longitude(longitude: f64) -> String {
    let sign = ZodiacSign::from_longitude(longitude);
    // Truncate to the printed precision so 29.999 never reads as 30.00.
    let within = longitude - f64::from(sign.index()) * 30.0;
    let within = ((within * 100.0) + 1e-9).floor() / 100.0;
    format!("{within:5.2}° {} {:<11}", sign.glyph(), sign.name())
}

fn write_aspect(f: &mut fmt::Formatter<'_>, aspect: &Aspect) -> fmt::Result {
    writeln!(
        f,
        "  {:<8} {} {:<8} orb {:>3.1}°  ({:?})",
        aspect.body_a.name(),
        aspect.kind.glyph(),
        aspect.body_b.name(),
        aspect.orb,
        aspect.nature
    )
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.chart;
        writeln!(
            f,
            "{} at ({:.4}, {:.4})",
            chart.instant, chart.location.lat, chart.location.lon
        )?;
        writeln!(
            f,
            "Sun {}  Moon {}  Rising {}",
            chart.signs.sun, chart.signs.moon, chart.signs.rising
        )?;
        writeln!(f, "Ascendant  {}", format_longitude(chart.ascendant))?;
        writeln!(f, "Midheaven  {}", format_longitude(chart.midheaven))?;
        if chart.houses.system != chart.house_system {
            writeln!(f, "Houses: {} (requested {})", chart.houses.system, chart.house_system)?;
        } else {
            writeln!(f, "Houses: {}", chart.houses.system)?;
        }
        writeln!(f)?;

        for p in chart.positions.values() {
            writeln!(
                f,
                "{} {:<8} {}  house {:>2}{}",
                p.body.glyph(),
                p.body.name(),
                format_longitude(p.longitude),
                p.house,
                if p.retrograde { "  ℞" } else { "" }
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Cusps:")?;
        for (i, cusp) in chart.houses.cusps.iter().enumerate() {
            writeln!(f, "  {:>2}  {}", i + 1, format_longitude(*cusp))?;
        }

        writeln!(f)?;
        writeln!(f, "Aspects ({}):", chart.aspects.len())?;
        for aspect in &chart.aspects {
            write_aspect(f, aspect)?;
        }

        if let Some(transits) = &self.transits {
            writeln!(f)?;
            writeln!(f, "Transits on {} ({}):", transits.instant, transits.aspects.len())?;
            for aspect in &transits.aspects {
                write_aspect(f, aspect)?;
            }
        }

        if let Some(phase) = &self.moon_phase {
            writeln!(f)?;
            writeln!(
                f,
                "Moon phase: {} {} ({:.1}% illuminated)",
                phase.name.glyph(),
                phase.name,
                phase.illumination
            )?;
        }
        Ok(())
    }
}
