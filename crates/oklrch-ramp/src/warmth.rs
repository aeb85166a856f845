//! Warmth correction for dark yellows.
//!
//! Yellow darkened at constant hue turns olive. Real dark yellows read as
//! brown, which sits further toward orange, so on the darker half of a
//! ramp hues in the yellow band rotate down a little, more the darker the
//! rail.

/// Lowest hue (degrees) treated as yellow.
pub const WARM_HUE_MIN: f64 = 60.0;

/// Highest hue (degrees) treated as yellow.
pub const WARM_HUE_MAX: f64 = 110.0;

/// Rails at or above this lightness are left alone.
pub const WARM_LIGHTNESS_LIMIT: f64 = 0.5;

/// Degrees of rotation per unit of lightness below the limit.
pub const WARM_SHIFT: f64 = 25.0;

/// Rotate a yellow hue toward orange for a dark target lightness.
///
/// `None` (an achromatic seed) passes through. Hues outside
/// `[WARM_HUE_MIN, WARM_HUE_MAX]` and lightness at or above
/// [`WARM_LIGHTNESS_LIMIT`] are returned unchanged; otherwise the hue
/// drops by `WARM_SHIFT * (0.5 - lightness)`, at most 12.5°.
#[must_use]
pub fn apply_warmth_correction(hue: Option<f64>, lightness: f64) -> Option<f64> {
    hue.map(|h| {
        if (WARM_HUE_MIN..=WARM_HUE_MAX).contains(&h) && lightness < WARM_LIGHTNESS_LIMIT {
            WARM_SHIFT.mul_add(-(WARM_LIGHTNESS_LIMIT - lightness), h)
        } else {
            h
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifted(h: f64, l: f64) -> f64 {
        apply_warmth_correction(Some(h), l).unwrap()
    }

    #[test]
    fn outside_the_band_is_identity() {
        assert_eq!(shifted(200.0, 0.3), 200.0);
        assert_eq!(shifted(59.9, 0.1), 59.9);
        assert_eq!(shifted(110.1, 0.1), 110.1);
    }

    #[test]
    fn light_rails_are_identity() {
        assert_eq!(shifted(80.0, 0.5), 80.0);
        assert_eq!(shifted(80.0, 0.9), 80.0);
    }

    #[test]
    fn darkest_rail_gets_the_full_shift() {
        assert_eq!(shifted(80.0, 0.0), 67.5);
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert!((shifted(60.0, 0.3) - 55.0).abs() < 1e-12);
        assert!((shifted(110.0, 0.3) - 105.0).abs() < 1e-12);
    }

    #[test]
    fn shift_grows_as_rails_darken() {
        let mut previous = shifted(90.0, 0.5);
        for l in [0.4, 0.3, 0.2, 0.1, 0.0] {
            let h = shifted(90.0, l);
            assert!(h < previous, "l={l}: {h} !< {previous}");
            assert!(90.0 - h <= 12.5 + 1e-12);
            previous = h;
        }
    }

    #[test]
    fn missing_hue_passes_through() {
        assert_eq!(apply_warmth_correction(None, 0.1), None);
    }
}
