//! Isobars: lines of equal OKLCH lightness across an HSV picker.
//!
//! An HSV square (saturation across, value up) says nothing about
//! perceived lightness. For a fixed hue, the isobar through a target
//! lightness marks, for every saturation, the value at which the color
//! lands on that lightness. Following it keeps a picked color on its
//! rail.
//!
//! Each point is also checked against the ramp generator's treatment: the
//! color's chroma at its warmth-corrected hue must still be displayable.
//! Points that fail are colors the generator would pull back in, so the
//! isobar splits into safe and unsafe segments.

use oklrch_color::{Hsv, Oklch};

use crate::gamut::is_displayable;
use crate::warmth::apply_warmth_correction;

/// Lightness error at which the value search stops.
pub const LIGHTNESS_TOLERANCE: f64 = 0.001;

const SEARCH_ITERATIONS: usize = 20;

/// The HSV value (0–1) at which `hsv(hue, saturation, value)` has OKLCH
/// lightness `target_l`.
///
/// Lightness grows with value at a fixed hue and saturation, so this is a
/// bounded bisection. `None` when the target is out of reach: brighter
/// than the color at full value, negative, or any input non-finite or a
/// saturation outside 0–1.
#[must_use]
pub fn value_for_lightness(hue: f64, saturation: f64, target_l: f64) -> Option<f64> {
    if !hue.is_finite() || !(0.0..=1.0).contains(&saturation) || !target_l.is_finite() {
        return None;
    }
    let lightness = |value: f64| Hsv::new(hue, saturation, value).to_oklch().l;
    if target_l < -LIGHTNESS_TOLERANCE || target_l > lightness(1.0) + LIGHTNESS_TOLERANCE {
        return None;
    }

    let mut low = 0.0;
    let mut high = 1.0;
    for _ in 0..SEARCH_ITERATIONS {
        let mid = (low + high) * 0.5;
        let l = lightness(mid);
        if (l - target_l).abs() < LIGHTNESS_TOLERANCE {
            return Some(mid);
        }
        if l < target_l {
            low = mid;
        } else {
            high = mid;
        }
    }
    Some((low + high) * 0.5)
}

/// One sample of an isobar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsobarPoint {
    pub saturation: f64,
    pub value: f64,
    /// The HSV color in OKLCH.
    pub oklch: Oklch,
    /// The color keeps its chroma after warmth correction.
    pub safe: bool,
}

impl IsobarPoint {
    fn at(hue: f64, saturation: f64, value: f64) -> Self {
        let oklch = Hsv::new(hue, saturation, value).to_oklch();
        let corrected = apply_warmth_correction(oklch.hue(), oklch.l).unwrap_or(oklch.h);
        let safe = is_displayable(oklch.l, oklch.c, corrected);
        Self { saturation, value, oklch, safe }
    }
}

/// Sample the isobar for `hue` through `target_l` at `samples + 1`
/// evenly spaced saturations from 0 to 1.
///
/// Saturations where the lightness cannot be reached are `None`.
/// `samples == 0` is treated as 1.
#[must_use]
pub fn sample_isobar(hue: f64, target_l: f64, samples: usize) -> Vec<Option<IsobarPoint>> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|i| {
            let saturation = i as f64 / samples as f64;
            value_for_lightness(hue, saturation, target_l)
                .map(|value| IsobarPoint::at(hue, saturation, value))
        })
        .collect()
}

/// A run of isobar samples with the same safety, as an inclusive index
/// range into the sampled points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsobarSegment {
    pub safe: bool,
    pub start: usize,
    pub end: usize,
}

/// Split sampled points into segments.
///
/// A gap (`None`) ends the current segment. Where safety changes the two
/// segments share the point at which it changed, so a drawn line stays
/// connected.
#[must_use]
pub fn isobar_segments(points: &[Option<IsobarPoint>]) -> Vec<IsobarSegment> {
    let mut segments: Vec<IsobarSegment> = Vec::new();
    let mut open = false;
    for (i, point) in points.iter().enumerate() {
        let Some(point) = point else {
            open = false;
            continue;
        };
        if open {
            let last = segments.len() - 1;
            segments[last].end = i;
            if segments[last].safe == point.safe {
                continue;
            }
        }
        segments.push(IsobarSegment { safe: point.safe, start: i, end: i });
        open = true;
    }
    segments
}
