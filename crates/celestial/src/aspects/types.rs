use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::Body;

/// How an aspect is traditionally read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Major,
    Soft,
    Hard,
}

/// The five Ptolemaic aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Matching order; every pattern is tried for every pair.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact separation in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Allowed deviation from [`angle`](Self::angle), inclusive.
    pub fn orb(self) -> f64 {
        match self {
            AspectKind::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn nature(self) -> AspectNature {
        match self {
            AspectKind::Conjunction => AspectNature::Major,
            AspectKind::Sextile | AspectKind::Trine => AspectNature::Soft,
            AspectKind::Square | AspectKind::Opposition => AspectNature::Hard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "☌",
            AspectKind::Sextile => "⚹",
            AspectKind::Square => "□",
            AspectKind::Trine => "△",
            AspectKind::Opposition => "☍",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One matched aspect between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    /// Exact angle of the pattern (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// |separation − exact angle|, one decimal
    pub orb: f64,
    pub nature: AspectNature,
}
