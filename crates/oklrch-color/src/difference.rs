// SPDX-License-Identifier: MIT
//
// Perceptual color difference.
//
// Two metrics, for two jobs:
//
//   - CIEDE2000 (ΔE00) on CIELAB D65: the "does this look like the color I
//     picked" question. ~1 is a just-noticeable difference, ~2.5 is visible
//     side by side.
//   - Euclidean distance in OKLCH with a chord term for hue (ΔEOK): cheap,
//     used by gamut mapping where only a 0.02 threshold matters.
#![allow(clippy::many_single_char_names)]

use std::f64::consts::PI;

use crate::color::{Color, Lab, Oklch};

/// 25^7, the chroma normalizer in the G and R_C terms.
const POW25_7: f64 = 6_103_515_625.0;

/// CIEDE2000 difference between two colors in any representation.
///
/// Both colors are converted to CIELAB (D65) first. Returns NaN if either
/// color has a NaN component; callers that compare distances must check.
#[must_use]
pub fn difference_ciede2000(reference: impl Into<Color>, sample: impl Into<Color>) -> f64 {
    ciede2000(reference.into().to_lab(), sample.into().to_lab())
}

/// CIEDE2000 with unit weighting factors (kL = kC = kH = 1).
#[must_use]
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let c_std = lab1.a.hypot(lab1.b);
    let c_smp = lab2.a.hypot(lab2.b);
    let c_avg = (c_std + c_smp) / 2.0;

    let c_avg7 = c_avg.powi(7);
    let g = 0.5 * (1.0 - (c_avg7 / (c_avg7 + POW25_7)).sqrt());

    let ap_std = lab1.a * (1.0 + g);
    let ap_smp = lab2.a * (1.0 + g);

    let cp_std = ap_std.hypot(lab1.b);
    let cp_smp = ap_smp.hypot(lab2.b);

    let hp_std = hue_radians(ap_std, lab1.b);
    let hp_smp = hue_radians(ap_smp, lab2.b);

    let d_l = lab2.l - lab1.l;
    let d_c = cp_smp - cp_std;

    let chroma_product = cp_std * cp_smp;
    let mut d_hp = if chroma_product == 0.0 { 0.0 } else { hp_smp - hp_std };
    if d_hp > PI {
        d_hp -= 2.0 * PI;
    } else if d_hp < -PI {
        d_hp += 2.0 * PI;
    }
    let d_h = 2.0 * chroma_product.sqrt() * (d_hp / 2.0).sin();

    let l_avg = (lab1.l + lab2.l) / 2.0;
    let cp_avg = (cp_std + cp_smp) / 2.0;

    let hp_avg = if chroma_product == 0.0 {
        hp_std + hp_smp
    } else {
        let mut h = (hp_std + hp_smp) / 2.0;
        if (hp_std - hp_smp).abs() > PI {
            h -= PI;
        }
        if h < 0.0 {
            h += 2.0 * PI;
        }
        h
    };

    let l_dev = (l_avg - 50.0).powi(2);
    let t = 0.2f64.mul_add(
        -(4.0f64.mul_add(hp_avg, -63.0f64.to_radians())).cos(),
        0.32f64.mul_add(
            (3.0f64.mul_add(hp_avg, PI / 30.0)).cos(),
            0.24f64.mul_add((2.0 * hp_avg).cos(), 0.17f64.mul_add(-(hp_avg - PI / 6.0).cos(), 1.0)),
        ),
    );

    let s_l = 1.0 + (0.015 * l_dev) / (20.0 + l_dev).sqrt();
    let s_c = 0.045f64.mul_add(cp_avg, 1.0);
    let s_h = (0.015 * cp_avg).mul_add(t, 1.0);

    let delta_theta = 30f64.to_radians() * (-((hp_avg.to_degrees() - 275.0) / 25.0).powi(2)).exp();
    let cp_avg7 = cp_avg.powi(7);
    let r_c = 2.0 * (cp_avg7 / (cp_avg7 + POW25_7)).sqrt();
    let r_t = -(2.0 * delta_theta).sin() * r_c;

    let l_term = d_l / s_l;
    let c_term = d_c / s_c;
    let h_term = d_h / s_h;

    (r_t * c_term).mul_add(h_term, h_term.mul_add(h_term, l_term.mul_add(l_term, c_term * c_term))).sqrt()
}

/// Euclidean OKLCH distance, hue contributing its chord `2·√(c₁c₂)·sin(Δh/2)`.
///
/// Hue is ignored when either color is achromatic.
#[must_use]
pub fn delta_e_ok(a: Oklch, b: Oklch) -> f64 {
    let d_l = a.l - b.l;
    let d_c = a.c - b.c;
    let d_h = match (a.hue(), b.hue()) {
        (Some(ha), Some(hb)) => 2.0 * (a.c * b.c).sqrt() * ((hb - ha).to_radians() / 2.0).sin(),
        _ => 0.0,
    };
    d_h.mul_add(d_h, d_l.mul_add(d_l, d_c * d_c)).sqrt()
}

/// Hue angle in [0, 2π); zero for a color with no a/b component.
#[inline]
fn hue_radians(a: f64, b: f64) -> f64 {
    if a.abs() + b.abs() == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a);
    if h < 0.0 { h + 2.0 * PI } else { h }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // Reference pairs from Sharma, Wu & Dalal (2005), "The CIEDE2000
    // Color-Difference Formula: Implementation Notes".
    const SHARMA: [([f64; 3], [f64; 3], f64); 6] = [
        ([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485], 2.0425),
        ([50.0, 3.1571, -77.2803], [50.0, 0.0, -82.7485], 2.8615),
        ([50.0, -1.3802, -84.2814], [50.0, 0.0, -82.7485], 1.0000),
        ([50.0, 0.0, 0.0], [50.0, -1.0, 2.0], 2.3669),
        ([50.0, 2.49, -0.001], [50.0, -2.49, 0.0011], 7.2195),
        ([60.2574, -34.0099, 36.2677], [60.4626, -34.1751, 39.4387], 1.2644),
    ];

    #[test]
    fn ciede2000_reference_pairs() {
        for (a, b, expected) in SHARMA {
            let de = ciede2000(Lab::new(a[0], a[1], a[2]), Lab::new(b[0], b[1], b[2]));
            assert!(approx_eq(de, expected, 1e-4), "{a:?} vs {b:?}: {de} != {expected}");
        }
    }

    #[test]
    fn ciede2000_is_symmetric() {
        let a = Lab::new(60.0, 20.0, -10.0);
        let b = Lab::new(40.0, -5.0, 30.0);
        assert!(approx_eq(ciede2000(a, b), ciede2000(b, a), 1e-9));
    }

    #[test]
    fn identical_colors_have_zero_difference() {
        let c = Oklch::new(0.5, 0.15, 0.0);
        assert!(difference_ciede2000(c, c) < 1e-9);
    }

    #[test]
    fn black_white_is_100() {
        let de = difference_ciede2000(Rgb::WHITE, Rgb::BLACK);
        assert!(approx_eq(de, 100.0, 1e-6), "ΔE: {de}");
    }

    #[test]
    fn mixed_representations_compare() {
        let lch = Oklch::new(0.5, 0.15, 0.0);
        let rgb = lch.to_rgb();
        assert!(difference_ciede2000(lch, rgb) < 1e-9);
    }

    #[test]
    fn nan_propagates() {
        let bad = Oklch::new(f64::NAN, 0.1, 0.0);
        assert!(difference_ciede2000(bad, Rgb::WHITE).is_nan());
    }

    #[test]
    fn delta_e_ok_hue_chord() {
        // Opposite hues at equal chroma: chord = 2c.
        let a = Oklch::new(0.5, 0.1, 0.0);
        let b = Oklch::new(0.5, 0.1, 180.0);
        assert!(approx_eq(delta_e_ok(a, b), 0.2, 1e-12));
    }

    #[test]
    fn delta_e_ok_ignores_achromatic_hue() {
        let a = Oklch::new(0.5, 0.0, 0.0);
        let b = Oklch::new(0.6, 0.0, 200.0);
        assert!(approx_eq(delta_e_ok(a, b), 0.1, 1e-12));
    }
}
