//! WCAG contrast for ramp swatches.
//!
//! Every swatch is labelled with the text color that reads best on it and
//! the WCAG 2.1 level that pairing reaches:
//!
//! - AAA: contrast ratio >= 7:1
//! - AA: >= 4.5:1
//! - AA Large: >= 3:1 (large or bold text only)
//! - Fail: below 3:1
//!
//! Contrast is measured on sRGB relative luminance (the WCAG definition),
//! not on OKLCH lightness.

use std::fmt;

use oklrch_color::Rgb;
use oklrch_color::color::srgb_to_linear;

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] for in-gamut colors.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = (srgb_to_linear(color.r), srgb_to_linear(color.g), srgb_to_linear(color.b));
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0] regardless of argument order:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG 2.1 conformance level of a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WcagRating {
    Fail,
    AaLarge,
    Aa,
    Aaa,
}

impl WcagRating {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::AaLarge => "AA Large",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for WcagRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// The better of white or black text on some background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextContrast {
    /// White text wins (otherwise black).
    pub on_white: bool,
    pub ratio: f64,
    pub rating: WcagRating,
}

impl TextContrast {
    /// The chosen text color.
    #[must_use]
    pub const fn text_color(&self) -> Rgb {
        if self.on_white { Rgb::WHITE } else { Rgb::BLACK }
    }
}

/// Pick white or black text for `background`, whichever contrasts more.
/// White wins ties.
#[must_use]
pub fn best_text_contrast(background: Rgb) -> TextContrast {
    let white = contrast_ratio(background, Rgb::WHITE);
    let black = contrast_ratio(background, Rgb::BLACK);
    let (on_white, ratio) = if white >= black { (true, white) } else { (false, black) };
    TextContrast { on_white, ratio, rating: WcagRating::from_ratio(ratio) }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use oklrch_color::Rgb8;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn hex(s: &str) -> Rgb {
        Rgb8::parse_hex(s).unwrap().to_rgb()
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_and_white() {
        assert!(approx_eq(relative_luminance(Rgb::BLACK), 0.0, 1e-12));
        assert!(approx_eq(relative_luminance(Rgb::WHITE), 1.0, 1e-12));
    }

    #[test]
    fn luminance_primaries() {
        assert!(approx_eq(relative_luminance(Rgb::new(1.0, 0.0, 0.0)), 0.2126, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(0.0, 1.0, 0.0)), 0.7152, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(0.0, 0.0, 1.0)), 0.0722, 1e-9));
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_is_symmetric_and_at_least_one() {
        let a = hex("#a33460");
        let b = hex("#ffc8dc");
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
        assert!(approx_eq(contrast_ratio(a, a), 1.0, 1e-12));
    }

    #[test]
    fn contrast_of_a_ramp_swatch() {
        let ratio = contrast_ratio(hex("#a33460"), Rgb::WHITE);
        assert!(approx_eq(ratio, 6.527, 1e-3), "{ratio}");
    }

    // ── Ratings ─────────────────────────────────────────────────────

    #[test]
    fn rating_thresholds_are_inclusive() {
        assert_eq!(WcagRating::from_ratio(7.0), WcagRating::Aaa);
        assert_eq!(WcagRating::from_ratio(6.99), WcagRating::Aa);
        assert_eq!(WcagRating::from_ratio(4.5), WcagRating::Aa);
        assert_eq!(WcagRating::from_ratio(4.49), WcagRating::AaLarge);
        assert_eq!(WcagRating::from_ratio(3.0), WcagRating::AaLarge);
        assert_eq!(WcagRating::from_ratio(2.99), WcagRating::Fail);
        assert!(WcagRating::Aaa > WcagRating::Fail);
    }

    #[test]
    fn rating_labels() {
        assert_eq!(WcagRating::AaLarge.to_string(), "AA Large");
        assert_eq!(format!("{:<4}", WcagRating::Aa), "AA  ");
    }

    // ── Best text ───────────────────────────────────────────────────

    #[test]
    fn dark_swatch_takes_white_text() {
        let best = best_text_contrast(hex("#100003"));
        assert!(best.on_white);
        assert_eq!(best.rating, WcagRating::Aaa);
        assert_eq!(best.text_color(), Rgb::WHITE);
    }

    #[test]
    fn light_swatch_takes_black_text() {
        let best = best_text_contrast(hex("#ffc8dc"));
        assert!(!best.on_white);
        assert!(approx_eq(best.ratio, 14.547, 1e-3), "{}", best.ratio);
        assert_eq!(best.text_color(), Rgb::BLACK);
    }

    #[test]
    fn mid_gray_is_close_either_way() {
        // #777 sits just past the point where black overtakes white.
        let best = best_text_contrast(hex("#777777"));
        assert!(!best.on_white);
        assert_eq!(best.rating, WcagRating::Aa);
    }

    #[test]
    fn anchor_swatch_rating() {
        let best = best_text_contrast(hex("#a33460"));
        assert!(best.on_white);
        assert_eq!(best.rating, WcagRating::Aa);
    }
}
