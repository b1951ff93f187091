//! Apparent retrograde motion from two longitude samples a day apart.

use crate::angle::signed_delta;
use crate::ephemeris::{Body, EphemerisError, EphemerisProvider};
use crate::time::{Instant, MAX_YEAR, MIN_YEAR};

/// Signed daily motion of `body` in degrees, wrapped across 0°/360°.
pub fn daily_motion<P: EphemerisProvider + ?Sized>(
    provider: &P,
    body: Body,
    instant: &Instant,
) -> Result<f64, EphemerisError> {
    let next = instant.plus_days(1).ok_or_else(|| EphemerisError::OutOfRange {
        body,
        when: format!("{instant} + 1 day"),
        min: MIN_YEAR,
        max: MAX_YEAR,
    })?;
    let today = provider.longitude_of(body, instant)?;
    let tomorrow = provider.longitude_of(body, &next)?;
    Ok(signed_delta(today, tomorrow))
}

/// Whether `body` moves backwards along the ecliptic at `instant`.
///
/// The Sun and Moon are never retrograde and are not sampled. A failed
/// sample reports `false`: retrograde status refines a chart, it never
/// blocks one.
pub fn is_retrograde<P: EphemerisProvider + ?Sized>(provider: &P, body: Body, instant: &Instant) -> bool {
    if body.is_luminary() {
        return false;
    }
    match daily_motion(provider, body, instant) {
        Ok(delta) => delta < 0.0,
        Err(e) => {
            log::debug!("retrograde sampling for {body} failed, reporting direct: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::AnalyticEphemeris;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Moves backwards by one degree a day across the 0° seam.
    struct BackwardsAcrossSeam;

    impl EphemerisProvider for BackwardsAcrossSeam {
        fn longitude_of(&self, _body: Body, instant: &Instant) -> Result<f64, EphemerisError> {
            let base = Instant::from_ymd_hm(2000, 1, 1, 12, 0).unwrap();
            Ok(if *instant == base { 0.5 } else { 359.5 })
        }
    }

    /// Fails every call after the first.
    struct FailsSecondSample(AtomicUsize);

    impl EphemerisProvider for FailsSecondSample {
        fn longitude_of(&self, body: Body, _instant: &Instant) -> Result<f64, EphemerisError> {
            if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(100.0)
            } else {
                Err(EphemerisError::UnknownBody {
                    name: body.name().to_string(),
                })
            }
        }
    }

    #[test]
    fn test_wraparound_is_backwards() {
        let when = Instant::from_ymd_hm(2000, 1, 1, 12, 0).unwrap();
        assert!(is_retrograde(&BackwardsAcrossSeam, Body::Mars, &when));
        let delta = daily_motion(&BackwardsAcrossSeam, Body::Mars, &when).unwrap();
        assert!((delta + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luminaries_never_sampled() {
        let when = Instant::from_ymd_hm(2000, 1, 1, 12, 0).unwrap();
        assert!(!is_retrograde(&BackwardsAcrossSeam, Body::Sun, &when));
        assert!(!is_retrograde(&BackwardsAcrossSeam, Body::Moon, &when));
    }

    #[test]
    fn test_failed_sample_degrades_to_direct() {
        let when = Instant::from_ymd_hm(2000, 1, 1, 12, 0).unwrap();
        let provider = FailsSecondSample(AtomicUsize::new(0));
        assert!(!is_retrograde(&provider, Body::Saturn, &when));
    }

    #[test]
    fn test_last_supported_day_degrades() {
        let when = Instant::from_ymd_hm(MAX_YEAR, 12, 31, 12, 0).unwrap();
        let eph = AnalyticEphemeris::new();
        assert!(matches!(
            daily_motion(&eph, Body::Mars, &when),
            Err(EphemerisError::OutOfRange { .. })
        ));
        assert!(!is_retrograde(&eph, Body::Mars, &when));
    }
}
