// SPDX-License-Identifier: MIT
//
// sRGB gamut mapping for OKLCH colors.
//
// A color outside sRGB keeps its lightness and hue and loses chroma until
// it fits, following the CSS Color 4 binary search: a candidate that clips
// to something within one just-noticeable difference (ΔEOK 0.02) of itself
// counts as good enough, so the search does not throw away chroma the eye
// would never miss.

use crate::color::{Oklch, Rgb};
use crate::difference::delta_e_ok;

/// Just-noticeable difference in ΔEOK units.
pub const JND: f64 = 0.02;

/// Search resolution: the nominal OKLCH chroma range (0–0.4) over 4000.
const CHROMA_EPSILON: f64 = 0.4 / 4000.0;

impl Oklch {
    /// Whether this color converts to sRGB with every channel in `[0, 1]`.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        self.to_rgb().in_gamut()
    }

    /// Map this color into the sRGB gamut.
    ///
    /// Lightness at or beyond the ends of the scale maps to pure white or
    /// black. Otherwise chroma is reduced by binary search (hue and
    /// lightness held) until the color is displayable, or until clipping it
    /// changes it by less than [`JND`]; in the latter case the clipped color
    /// is returned.
    #[must_use]
    pub fn to_gamut(self) -> Rgb {
        if self.l >= 1.0 {
            return Rgb::WHITE;
        }
        if self.l <= 0.0 {
            return Rgb::BLACK;
        }

        let rgb = self.to_rgb();
        if rgb.in_gamut() {
            return rgb;
        }

        let mut candidate = self;
        let mut start = 0.0;
        let mut end = self.c;
        let mut clipped = rgb.clip();

        while end - start > CHROMA_EPSILON {
            candidate.c = (start + end) * 0.5;
            let rgb = candidate.to_rgb();
            clipped = rgb.clip();
            if rgb.in_gamut() || delta_e_ok(candidate, clipped.to_oklch()) <= JND {
                start = candidate.c;
            } else {
                end = candidate.c;
            }
        }

        let rgb = candidate.to_rgb();
        if rgb.in_gamut() { rgb } else { clipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        if d > 180.0 { 360.0 - d } else { d }
    }

    #[test]
    fn in_gamut_colors_unchanged() {
        let c = Oklch::new(0.5, 0.15, 0.0);
        assert!(c.in_srgb_gamut());
        assert_eq!(c.to_gamut(), c.to_rgb());
        assert_eq!(c.to_gamut().to_hex(), "#a33460");
    }

    #[test]
    fn out_of_gamut_reduced_to_fit() {
        let vivid = Oklch::new(0.6, 0.3, 145.0);
        assert!(!vivid.in_srgb_gamut());

        let mapped = vivid.to_gamut();
        assert!(mapped.in_gamut(), "{mapped:?}");

        let lch = mapped.to_oklch();
        assert!(lch.c < vivid.c, "chroma not reduced: {lch}");
        assert!((lch.l - vivid.l).abs() < 0.02, "lightness drifted: {lch}");
        assert!(hue_diff(lch.h, vivid.h) < 3.0, "hue drifted: {lch}");
    }

    #[test]
    fn lightness_extremes_map_to_black_and_white() {
        assert_eq!(Oklch::new(1.0, 0.2, 90.0).to_gamut(), Rgb::WHITE);
        assert_eq!(Oklch::new(1.2, 0.0, 0.0).to_gamut(), Rgb::WHITE);
        assert_eq!(Oklch::new(0.0, 0.2, 90.0).to_gamut(), Rgb::BLACK);
    }

    #[test]
    fn mapping_is_close_to_the_chroma_edge() {
        // Clipping may nudge lightness by up to about one JND; chroma is
        // what gives.
        for h in [0.0, 60.0, 120.0, 200.0, 264.0, 320.0] {
            let ideal = Oklch::new(0.7, 0.4, h);
            let mapped = ideal.to_gamut().to_oklch();
            assert!((mapped.l - ideal.l).abs() < 1.5 * JND, "h={h}: {mapped}");
            assert!(mapped.c < ideal.c, "h={h}: {mapped}");
        }
    }
}
