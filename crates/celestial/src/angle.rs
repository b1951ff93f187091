//! Angle arithmetic on the ecliptic circle.
//!
//! Every longitude that leaves this crate passes through [`normalize_angle`].

/// Reduce any finite angle into `[0, 360)`.
///
/// `rem_euclid` can round a tiny negative remainder up to exactly `360.0`;
/// that case folds back to `0.0`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Shortest arc between two longitudes, in `[0, 180]`.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    diff.min(360.0 - diff)
}

/// Signed progress from `from` to `to`, corrected across the 0°/360° seam.
///
/// Positive means forward (increasing longitude) motion.
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let mut diff = to - from;
    if diff > 180.0 {
        diff -= 360.0;
    }
    if diff < -180.0 {
        diff += 360.0;
    }
    diff
}

/// Zodiac sign index (0 = Aries ... 11 = Pisces) of a longitude.
pub fn sign_index(longitude: f64) -> u8 {
    ((normalize_angle(longitude) / 30.0).floor() as u8).min(11)
}

/// Degrees past the start of the sign, rounded to two decimals.
pub fn degree_within_sign(longitude: f64) -> f64 {
    let lon = normalize_angle(longitude);
    round_to(lon - f64::from(sign_index(lon)) * 30.0, 2)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
