use crate::angle::{angular_separation, round_to};
use crate::aspects::types::{Aspect, AspectKind};
use crate::ephemeris::Body;

/// Pairwise aspect matching over body longitudes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Aspects among one set of positions, pairs taken in list order (i < j).
    pub fn aspects(&self, positions: &[(Body, f64)]) -> Vec<Aspect> {
        let mut found = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let (a, lon_a) = positions[i];
                let (b, lon_b) = positions[j];
                self.push_matches(&mut found, a, lon_a, b, lon_b);
            }
        }
        found
    }

    /// Aspects from every body in `from` to every body in `to`.
    ///
    /// Used for transits: `from` is the current sky, `to` the natal chart.
    /// The same body on both sides is compared too.
    pub fn cross_aspects(&self, from: &[(Body, f64)], to: &[(Body, f64)]) -> Vec<Aspect> {
        let mut found = Vec::new();
        for &(a, lon_a) in from {
            for &(b, lon_b) in to {
                self.push_matches(&mut found, a, lon_a, b, lon_b);
            }
        }
        found
    }

    /// Every aspect pattern matched by two longitudes, in pattern order.
    pub fn matching_kinds(&self, lon_a: f64, lon_b: f64) -> Vec<(AspectKind, f64)> {
        let separation = angular_separation(lon_a, lon_b);
        AspectKind::ALL
            .iter()
            .filter_map(|&kind| {
                let deviation = (separation - kind.angle()).abs();
                (deviation <= kind.orb()).then_some((kind, deviation))
            })
            .collect()
    }

    fn push_matches(&self, found: &mut Vec<Aspect>, a: Body, lon_a: f64, b: Body, lon_b: f64) {
        for (kind, deviation) in self.matching_kinds(lon_a, lon_b) {
            found.push(Aspect {
                body_a: a,
                body_b: b,
                kind,
                exact_angle: kind.angle(),
                orb: round_to(deviation, 1),
                nature: kind.nature(),
            });
        }
    }
}
