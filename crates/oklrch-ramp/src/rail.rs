//! Lightness rails.
//!
//! A rail is an OKLCH lightness in percent that every ramp swatch is
//! rendered on. Rails run from lightest (index 0) to darkest and are
//! spread between a `min` and `max` by a cubic bezier easing curve, the
//! same shape CSS `cubic-bezier()` describes: fixed endpoints (0,0) and
//! (1,1), two free control points.
//!
//! # Presets
//!
//! | Name           | Control points         | Effect                         |
//! |----------------|------------------------|--------------------------------|
//! | Uniform        | (0.5, 0.5, 0.5, 0.5)   | even spacing                   |
//! | Mid-Tone Focus | (0.15, 0.9, 0.85, 0.1) | dense around the middle        |
//! | Surface Focus  | (0.42, 0, 0.58, 1)     | dense at both ends             |
//! | Shadow Focus   | (0, 0, 0.58, 1)        | dense among the darks          |
//! | Tint Focus     | (0.42, 0, 1, 1)        | dense among the lights         |

use std::fmt;

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-6;
const PRESET_EPSILON: f64 = 0.001;

/// A cubic bezier easing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Curve {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The bezier parameter `t` whose x coordinate is `x`.
    ///
    /// Newton–Raphson from `t = x`, stopping early on a flat slope; the
    /// result is clamped to `[0, 1]`.
    #[must_use]
    pub fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            t -= (bezier(t, self.x1, self.x2) - x) / slope;
        }
        t.clamp(0.0, 1.0)
    }

    /// The curve's y coordinate at parameter `t`.
    #[must_use]
    pub fn y_at_t(&self, t: f64) -> f64 {
        bezier(t, self.y1, self.y2)
    }

    /// y as a function of x.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.y_at_t(self.solve_t(x))
    }
}

impl Default for Curve {
    fn default() -> Self {
        CurvePreset::Uniform.curve()
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// One coordinate of a cubic bezier with endpoints 0 and 1.
fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    (3.0 * mt * mt * t).mul_add(p1, (3.0 * mt * t * t).mul_add(p2, t * t * t))
}

/// d/dt of [`bezier`].
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    (3.0 * mt * mt).mul_add(p1, (6.0 * mt * t).mul_add(p2 - p1, 3.0 * t * t * (1.0 - p2)))
}

/// Named rail distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurvePreset {
    Uniform,
    MidToneFocus,
    SurfaceFocus,
    ShadowFocus,
    TintFocus,
}

impl CurvePreset {
    pub const ALL: [Self; 5] = [
        Self::Uniform,
        Self::MidToneFocus,
        Self::SurfaceFocus,
        Self::ShadowFocus,
        Self::TintFocus,
    ];

    #[must_use]
    pub const fn curve(self) -> Curve {
        match self {
            Self::Uniform => Curve::new(0.5, 0.5, 0.5, 0.5),
            Self::MidToneFocus => Curve::new(0.15, 0.9, 0.85, 0.1),
            Self::SurfaceFocus => Curve::new(0.42, 0.0, 0.58, 1.0),
            Self::ShadowFocus => Curve::new(0.0, 0.0, 0.58, 1.0),
            Self::TintFocus => Curve::new(0.42, 0.0, 1.0, 1.0),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uniform => "Uniform",
            Self::MidToneFocus => "Mid-Tone Focus",
            Self::SurfaceFocus => "Surface Focus",
            Self::ShadowFocus => "Shadow Focus",
            Self::TintFocus => "Tint Focus",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Uniform => "Equal lightness steps across the range",
            Self::MidToneFocus => "More steps around the middle lightness",
            Self::SurfaceFocus => "More steps near the lightest and darkest ends",
            Self::ShadowFocus => "More steps among the dark shades",
            Self::TintFocus => "More steps among the light tints",
        }
    }

    /// Look a preset up by display name, case-insensitively. Spaces,
    /// hyphens and underscores are interchangeable, so `mid-tone-focus`,
    /// `Mid-Tone Focus` and `midtone_focus` all match.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = squash(name);
        Self::ALL.into_iter().find(|preset| squash(preset.name()) == key)
    }

    /// The preset whose control points all lie within 0.001 of `curve`.
    /// `None` means a custom curve.
    #[must_use]
    pub fn matching(curve: &Curve) -> Option<Self> {
        let close = |a: f64, b: f64| (a - b).abs() < PRESET_EPSILON;
        Self::ALL.into_iter().find(|preset| {
            let p = preset.curve();
            close(p.x1, curve.x1)
                && close(p.y1, curve.y1)
                && close(p.x2, curve.x2)
                && close(p.y2, curve.y2)
        })
    }
}

impl fmt::Display for CurvePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Display name for a curve: the matching preset's name or `"Custom"`.
#[must_use]
pub fn curve_name(curve: &Curve) -> &'static str {
    CurvePreset::matching(curve).map_or("Custom", CurvePreset::name)
}

/// `steps` rail lightnesses (percent) from `max` down to `min`, spaced by
/// `curve`.
///
/// Each rail is rounded to a whole percent and clamped to 0–100. A single
/// step (or none) yields just `[max]`.
#[must_use]
pub fn rail_lightnesses(min: f64, max: f64, steps: usize, curve: &Curve) -> Vec<f64> {
    if steps <= 1 {
        return vec![max];
    }
    let last = (steps - 1) as f64;
    (0..steps)
        .map(|i| {
            let y = curve.eval(i as f64 / last);
            (y.mul_add(-(max - min), max)).round().clamp(0.0, 100.0)
        })
        .collect()
}

/// Index of the rail closest to `lightness` (0–1), first wins on ties.
///
/// Used to preselect a rail for a picked color. `None` for no rails.
#[must_use]
pub fn nearest_rail(rails: &[f64], lightness: f64) -> Option<usize> {
    let target = lightness * 100.0;
    rails
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &rail)| {
            let distance = (rail - target).abs();
            match best {
                Some((_, d)) if d <= distance => best,
                _ => Some((i, distance)),
            }
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Curve ───────────────────────────────────────────────────────

    #[test]
    fn curves_pass_through_endpoints() {
        for preset in CurvePreset::ALL {
            let curve = preset.curve();
            assert!(approx_eq(curve.eval(0.0), 0.0, 1e-9), "{preset}");
            assert!(approx_eq(curve.eval(1.0), 1.0, 1e-9), "{preset}");
        }
    }

    #[test]
    fn uniform_is_linear() {
        let curve = CurvePreset::Uniform.curve();
        for i in 0..=10 {
            let x = f64::from(i) / 10.0;
            assert!(approx_eq(curve.eval(x), x, 1e-6), "x={x}: {}", curve.eval(x));
        }
    }

    #[test]
    fn solve_t_inverts_x() {
        let curve = CurvePreset::SurfaceFocus.curve();
        for x in [0.1, 0.25, 0.5, 0.75, 0.9] {
            let t = curve.solve_t(x);
            assert!(approx_eq(bezier(t, curve.x1, curve.x2), x, 1e-4), "x={x} t={t}");
        }
    }

    #[test]
    fn solve_t_stays_in_unit_range() {
        let curve = Curve::new(0.0, 0.0, 1.0, 1.0);
        for x in [-0.5, 0.0, 0.5, 1.0, 1.5] {
            let t = curve.solve_t(x);
            assert!((0.0..=1.0).contains(&t), "x={x} t={t}");
        }
    }

    #[test]
    fn ease_curves_bend_the_right_way() {
        // Tint focus eases in: early x covers little y.
        assert!(CurvePreset::TintFocus.curve().eval(0.25) < 0.25);
        // Mid-tone focus rushes through the ends.
        assert!(CurvePreset::MidToneFocus.curve().eval(0.25) > 0.25);
    }

    // ── Presets ─────────────────────────────────────────────────────

    #[test]
    fn preset_names_round_trip() {
        for preset in CurvePreset::ALL {
            assert_eq!(CurvePreset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(CurvePreset::from_name("mid-tone-focus"), Some(CurvePreset::MidToneFocus));
        assert_eq!(CurvePreset::from_name("SHADOW_FOCUS"), Some(CurvePreset::ShadowFocus));
        assert_eq!(CurvePreset::from_name("spiral"), None);
    }

    #[test]
    fn matching_tolerates_small_drift() {
        let nearly = Curve::new(0.4205, 0.0, 0.58, 0.9995);
        assert_eq!(CurvePreset::matching(&nearly), Some(CurvePreset::SurfaceFocus));
        assert_eq!(curve_name(&nearly), "Surface Focus");
    }

    #[test]
    fn unknown_curve_is_custom() {
        let custom = Curve::new(0.3, 0.1, 0.7, 0.9);
        assert_eq!(CurvePreset::matching(&custom), None);
        assert_eq!(curve_name(&custom), "Custom");
    }

    #[test]
    fn default_curve_is_uniform() {
        assert_eq!(curve_name(&Curve::default()), "Uniform");
    }

    // ── Rails ───────────────────────────────────────────────────────

    #[test]
    fn uniform_rails_step_evenly_from_light_to_dark() {
        let rails = rail_lightnesses(5.0, 95.0, 7, &Curve::default());
        assert_eq!(rails, vec![95.0, 80.0, 65.0, 50.0, 35.0, 20.0, 5.0]);
    }

    #[test]
    fn rails_keep_their_endpoints() {
        for preset in CurvePreset::ALL {
            let rails = rail_lightnesses(10.0, 90.0, 9, &preset.curve());
            assert_eq!(rails.len(), 9);
            assert_eq!(rails[0], 90.0, "{preset}");
            assert_eq!(rails[8], 10.0, "{preset}");
            assert!(rails.windows(2).all(|w| w[0] >= w[1]), "{preset}: {rails:?}");
        }
    }

    #[test]
    fn single_step_is_just_max() {
        assert_eq!(rail_lightnesses(5.0, 95.0, 1, &Curve::default()), vec![95.0]);
        assert_eq!(rail_lightnesses(5.0, 95.0, 0, &Curve::default()), vec![95.0]);
    }

    #[test]
    fn rails_clamp_to_percent_range() {
        let rails = rail_lightnesses(-20.0, 130.0, 3, &Curve::default());
        assert_eq!(rails, vec![100.0, 55.0, 0.0]);
    }

    #[test]
    fn nearest_rail_by_lightness() {
        let rails = [95.0, 80.0, 65.0, 50.0];
        assert_eq!(nearest_rail(&rails, 0.66), Some(2));
        assert_eq!(nearest_rail(&rails, 1.0), Some(0));
        assert_eq!(nearest_rail(&rails, 0.0), Some(3));
    }

    #[test]
    fn nearest_rail_first_wins_ties() {
        assert_eq!(nearest_rail(&[60.0, 40.0], 0.5), Some(0));
        assert_eq!(nearest_rail(&[], 0.5), None);
    }
}
