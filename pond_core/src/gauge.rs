//! Reading classification against a user's thresholds.
//!
//! A reading falls into one of four zones relative to its bounds. The
//! near-bound band is 10% of the domain span on either side of a bound;
//! when the two bands overlap (bounds closer than 20% of the span) the
//! lower band wins because it is checked first. That ordering is inherited
//! behavior and must not be reordered.

use crate::error::ValidationError;

/// Classification of a reading relative to its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Normal,
    NearLower,
    NearUpper,
    OutOfRange,
}

/// Classify `value` against `[lower, upper]` within a domain of width `span`.
///
/// The out-of-range check is authoritative and evaluated first; the near
/// bands are inclusive on both sides of each bound.
pub fn classify(value: f32, lower: f32, upper: f32, span: f32) -> Zone {
    if value < lower || value > upper {
        return Zone::OutOfRange;
    }
    let band = 0.1 * span;
    if value >= lower - band && value <= lower + band {
        return Zone::NearLower;
    }
    if value >= upper - band && value <= upper + band {
        return Zone::NearUpper;
    }
    Zone::Normal
}

/// Needle rotation in degrees for the dashboard gauge.
///
/// The value's position in the domain is clamped to [0, 100] percent and
/// mapped onto the 270 degree sweep from -45 to 225. Non-finite inputs pin
/// the needle at the low stop.
pub fn needle_angle(value: f32, domain_min: f32, domain_max: f32) -> f32 {
    let raw = (value - domain_min) / (domain_max - domain_min) * 100.0;
    let pct = if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        0.0
    };
    -45.0 + pct * 270.0 / 100.0
}

/// Reject an inverted or non-finite bound pair. Every edit surface calls
/// this before committing to the store.
pub fn validate_range(lower: f32, upper: f32) -> Result<(), ValidationError> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(ValidationError::NonFinite);
    }
    if lower >= upper {
        return Err(ValidationError::InvertedRange { lower, upper });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_authoritative() {
        // 36 is above the upper bound even though it is also "near" it
        assert_eq!(classify(36.0, 20.0, 35.0, 50.0), Zone::OutOfRange);
        assert_eq!(classify(19.9, 20.0, 35.0, 50.0), Zone::OutOfRange);
    }

    #[test]
    fn near_upper_within_tenth_of_span() {
        // band = 5 for a span of 50
        assert_eq!(classify(34.9, 20.0, 35.0, 50.0), Zone::NearUpper);
        assert_eq!(classify(30.0, 20.0, 35.0, 50.0), Zone::NearUpper);
        assert_eq!(classify(29.9, 20.0, 35.0, 50.0), Zone::Normal);
    }

    #[test]
    fn near_lower_wins_when_bands_overlap() {
        // bounds 3 apart with band = 5: both bands cover the whole range
        assert_eq!(classify(25.5, 24.0, 27.0, 50.0), Zone::NearLower);
    }

    #[test]
    fn needle_angle_endpoints() {
        assert_eq!(needle_angle(0.0, 0.0, 50.0), -45.0);
        assert_eq!(needle_angle(50.0, 0.0, 50.0), 225.0);
        assert_eq!(needle_angle(25.0, 0.0, 50.0), 90.0);
    }

    #[test]
    fn needle_angle_clamps_outside_domain() {
        assert_eq!(needle_angle(-10.0, 0.0, 50.0), -45.0);
        assert_eq!(needle_angle(999.0, 0.0, 50.0), 225.0);
    }

    #[test]
    fn needle_angle_non_finite_pins_low() {
        assert_eq!(needle_angle(f32::NAN, 0.0, 50.0), -45.0);
        assert_eq!(needle_angle(10.0, 5.0, 5.0), -45.0);
    }

    #[test]
    fn validate_range_rejects_inversion_and_nan() {
        assert!(validate_range(20.0, 35.0).is_ok());
        assert!(matches!(
            validate_range(35.0, 20.0),
            Err(ValidationError::InvertedRange { .. })
        ));
        assert!(matches!(
            validate_range(20.0, 20.0),
            Err(ValidationError::InvertedRange { .. })
        ));
        assert_eq!(
            validate_range(f32::NAN, 20.0),
            Err(ValidationError::NonFinite)
        );
    }
}
