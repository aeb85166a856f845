//! Ramp settings — the `name=value` system.
//!
//! Parses setting directives and applies them to [`RampSettings`], the
//! knobs that decide which rails a ramp is rendered on and how it is
//! shown.
//!
//! # Supported syntax
//!
//! | Syntax         | Effect                   |
//! |----------------|--------------------------|
//! | `name=value`   | Assign a value           |
//! | `name`         | Enable a boolean setting |
//! | `noname`       | Disable a boolean        |
//!
//! # Settings
//!
//! | Name      | Abbrev | Type                      | Default |
//! |-----------|--------|---------------------------|---------|
//! | `min`     |        | lightness 0–100           | 5       |
//! | `max`     |        | lightness 0–100           | 95      |
//! | `steps`   | `n`    | integer, clamped to 3–15  | 7       |
//! | `curve`   |        | preset name or `x1,y1,x2,y2` | Uniform |
//! | `opacity` | `op`   | percent 0–100             | 100     |
//! | `color`   |        | bool (`on`/`off` too)     | true    |

use std::error::Error;
use std::fmt;

use crate::rail::{Curve, CurvePreset, curve_name, rail_lightnesses};

pub const MIN_STEPS: usize = 3;
pub const MAX_STEPS: usize = 15;

/// One parsed directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Min(f64),
    Max(f64),
    Steps(usize),
    Curve(Curve),
    Opacity(f64),
    Color(bool),
}

/// A directive that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingError {
    pub name: String,
    pub reason: String,
}

impl SettingError {
    fn new(name: &str, reason: impl Into<String>) -> Self {
        Self { name: name.to_string(), reason: reason.into() }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "setting '{}': {}", self.name, self.reason)
    }
}

impl Error for SettingError {}

/// Returns `true` if `name` is a known boolean setting.
#[must_use]
pub fn is_bool_setting(name: &str) -> bool {
    name == "color"
}

/// Returns `true` if `name` is any known setting (full name or abbreviation).
#[must_use]
pub fn is_known_setting(name: &str) -> bool {
    matches!(name, "min" | "max" | "steps" | "n" | "curve" | "opacity" | "op")
        || is_bool_setting(name)
}

/// Parse every whitespace-separated directive in `args`.
///
/// # Errors
///
/// The first directive that fails to parse.
pub fn parse_settings(args: &str) -> Result<Vec<Setting>, SettingError> {
    args.split_whitespace().map(parse_setting).collect()
}

/// Parse a single directive.
///
/// # Errors
///
/// [`SettingError`] for an unknown name, a missing value or a value out
/// of range.
pub fn parse_setting(arg: &str) -> Result<Setting, SettingError> {
    let Some((name, value)) = arg.split_once('=') else {
        if is_bool_setting(arg) {
            return Ok(Setting::Color(true));
        }
        // "nocolor"; the prefix check keeps unknown "no…" names unknown.
        if let Some(name) = arg.strip_prefix("no") {
            if is_bool_setting(name) {
                return Ok(Setting::Color(false));
            }
        }
        return Err(if is_known_setting(arg) {
            SettingError::new(arg, "expected name=value")
        } else {
            SettingError::new(arg, "unknown setting")
        });
    };

    match name {
        "min" => parse_percent(name, value).map(Setting::Min),
        "max" => parse_percent(name, value).map(Setting::Max),
        "steps" | "n" => value
            .parse::<usize>()
            .map(Setting::Steps)
            .map_err(|_| SettingError::new(name, format!("'{value}' is not a step count"))),
        "curve" => parse_curve(value).map(Setting::Curve).ok_or_else(|| {
            SettingError::new(name, format!("'{value}' is neither a preset nor x1,y1,x2,y2"))
        }),
        "opacity" | "op" => parse_percent(name, value).map(Setting::Opacity),
        "color" => parse_bool(value)
            .map(Setting::Color)
            .ok_or_else(|| SettingError::new(name, format!("'{value}' is not on/off"))),
        _ => Err(SettingError::new(name, "unknown setting")),
    }
}

fn parse_percent(name: &str, value: &str) -> Result<f64, SettingError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| (0.0..=100.0).contains(v))
        .ok_or_else(|| SettingError::new(name, format!("'{value}' is not between 0 and 100")))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// A preset name, or four comma-separated control points with both x
/// coordinates in `[0, 1]`.
fn parse_curve(value: &str) -> Option<Curve> {
    if let Some(preset) = CurvePreset::from_name(value) {
        return Some(preset.curve());
    }
    let points: Vec<f64> = value
        .split(',')
        .map(|p| p.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<_>>()?;
    let [x1, y1, x2, y2] = points[..] else {
        return None;
    };
    let unit = 0.0..=1.0;
    (unit.contains(&x1) && unit.contains(&x2)).then_some(Curve::new(x1, y1, x2, y2))
}

/// Everything that shapes a ramp besides its seed.
#[derive(Debug, Clone, PartialEq)]
pub struct RampSettings {
    /// Darkest rail, percent lightness.
    pub min: f64,
    /// Lightest rail, percent lightness.
    pub max: f64,
    pub steps: usize,
    pub curve: Curve,
    /// Swatch preview opacity over white, percent.
    pub opacity: f64,
    /// Paint truecolor swatches in terminal output.
    pub color: bool,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            min: 5.0,
            max: 95.0,
            steps: 7,
            curve: Curve::default(),
            opacity: 100.0,
            color: true,
        }
    }
}

impl RampSettings {
    /// Apply one directive.
    ///
    /// `min` and `max` cannot cross: each is clamped against the other.
    /// `steps` is clamped to `MIN_STEPS..=MAX_STEPS`.
    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::Min(v) => self.min = v.min(self.max).max(0.0),
            Setting::Max(v) => self.max = v.max(self.min).min(100.0),
            Setting::Steps(n) => self.steps = n.clamp(MIN_STEPS, MAX_STEPS),
            Setting::Curve(curve) => self.curve = curve,
            Setting::Opacity(v) => self.opacity = v.clamp(0.0, 100.0),
            Setting::Color(on) => self.color = on,
        }
    }

    /// Apply directives in order.
    pub fn apply_all(&mut self, settings: impl IntoIterator<Item = Setting>) {
        for setting in settings {
            self.apply(setting);
        }
    }

    /// Rail lightnesses (percent), lightest first.
    #[must_use]
    pub fn rails(&self) -> Vec<f64> {
        rail_lightnesses(self.min, self.max, self.steps, &self.curve)
    }

    /// `"Uniform"`, another preset name, or `"Custom"`.
    #[must_use]
    pub fn curve_name(&self) -> &'static str {
        curve_name(&self.curve)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
