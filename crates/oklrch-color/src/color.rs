// SPDX-License-Identifier: MIT
//
// Color spaces used by the ramp engine.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Every color the engine touches is one of three tagged representations:
// sRGB, HSL or OKLCH. Oklab, linear sRGB and CIELAB (D65) are intermediates
// that only exist inside a conversion or a distance computation.
//
// Conversion pipeline:
//
//   HSL ↔ sRGB ↔ Linear sRGB ↔ Oklab ↔ OKLCH
//                     │
//                     └──→ XYZ (D65) ──→ CIELAB (D65)
//
// All math is f64. The matrices match the ones published by Björn Ottosson
// at full precision, and the sRGB transfer function is sign-preserving so
// that out-of-gamut colors (negative channels) survive a round trip instead
// of turning into NaN.

use std::fmt;

/// Chroma below which a color is treated as having no hue.
pub const ACHROMATIC_EPSILON: f64 = 1e-8;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A color in one of the three representations callers hand to the engine.
///
/// The variant is the color's mode: fields are checked at compile time, so
/// there is never a question of whether `h` or `r` exists on a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgb(Rgb),
    Hsl(Hsl),
    Hsv(Hsv),
    Oklch(Oklch),
}

impl Color {
    /// Convert to sRGB (may be out of gamut).
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Hsl(hsl) => hsl.to_rgb(),
            Self::Hsv(hsv) => hsv.to_rgb(),
            Self::Oklch(lch) => lch.to_rgb(),
        }
    }

    /// Convert to OKLCH.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        match self {
            Self::Rgb(rgb) => rgb.to_oklch(),
            Self::Hsl(hsl) => hsl.to_rgb().to_oklch(),
            Self::Hsv(hsv) => hsv.to_rgb().to_oklch(),
            Self::Oklch(lch) => lch,
        }
    }

    /// Convert to HSL.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        match self {
            Self::Hsl(hsl) => hsl,
            other => other.to_rgb().to_hsl(),
        }
    }

    /// Convert to CIELAB (D65).
    #[must_use]
    pub fn to_lab(self) -> Lab {
        match self {
            Self::Oklch(lch) => lch.to_oklab().to_lab(),
            other => other.to_rgb().to_lab(),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Self::Hsl(hsl)
    }
}

impl From<Hsv> for Color {
    fn from(hsv: Hsv) -> Self {
        Self::Hsv(hsv)
    }
}

impl From<Oklch> for Color {
    fn from(lch: Oklch) -> Self {
        Self::Oklch(lch)
    }
}

// ─── sRGB ────────────────────────────────────────────────────────────────────

/// Gamma-encoded sRGB with nominal channel range 0.0–1.0.
///
/// Channels outside that range are legal values: they describe a color the
/// display cannot show. [`Rgb::in_gamut`] tells the two cases apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Whether every channel is a finite number.
    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Strict gamut test: every channel in `[0, 1]`.
    #[must_use]
    pub fn in_gamut(self) -> bool {
        self.in_gamut_within(0.0)
    }

    /// Gamut test with slack: every channel in `[-tolerance, 1 + tolerance]`.
    ///
    /// NaN channels are never in gamut.
    #[must_use]
    pub fn in_gamut_within(self, tolerance: f64) -> bool {
        let range = -tolerance..=1.0 + tolerance;
        range.contains(&self.r) && range.contains(&self.g) && range.contains(&self.b)
    }

    /// Clamp every channel into `[0, 1]`.
    #[must_use]
    pub const fn clip(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Quantize to 8 bits per channel (clamped, rounded half up).
    #[must_use]
    pub fn to_rgb8(self) -> Rgb8 {
        Rgb8::new(to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// `#rrggbb`, lower case.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb8().to_hex()
    }

    /// Remove the transfer function, channel by channel.
    #[must_use]
    pub fn to_linear(self) -> (f64, f64, f64) {
        (srgb_to_linear(self.r), srgb_to_linear(self.g), srgb_to_linear(self.b))
    }

    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let (r, g, b) = self.to_linear();
        linear_srgb_to_oklab(r, g, b)
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        self.to_oklab().to_oklch()
    }

    /// Convert to HSL. Achromatic colors get hue 0.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;
        let l = 0.5 * (max + min);

        if delta == 0.0 {
            return Hsl::new(0.0, 0.0, l);
        }

        let s = delta / (1.0 - (max + min - 1.0).abs());
        Hsl::new(self.hue_degrees(max, delta), s, l)
    }

    /// Convert to HSV. Achromatic colors get hue 0.
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        if delta == 0.0 {
            return Hsv::new(0.0, 0.0, max);
        }
        Hsv::new(self.hue_degrees(max, delta), delta / max, max)
    }

    /// The hexcone hue shared by HSL and HSV, for a chromatic color whose
    /// largest channel is `max` and channel spread is `delta`.
    #[allow(clippy::float_cmp)]
    fn hue_degrees(self, max: f64, delta: f64) -> f64 {
        let sector = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        sector * 60.0
    }

    /// Convert to CIELAB with the D65 reference white.
    #[must_use]
    pub fn to_lab(self) -> Lab {
        let (r, g, b) = self.to_linear();
        linear_srgb_to_lab(r, g, b)
    }
}

// ─── 8-bit sRGB ──────────────────────────────────────────────────────────────

/// Quantized sRGB, the form colors take in hex strings and on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional, digits are
    /// case-insensitive).
    ///
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// `#rrggbb`, lower case.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Back to floating-point sRGB.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        Rgb::new(
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Composite this color at `opacity` percent over a white page.
    ///
    /// `opacity` is clamped to 0–100. This is what a swatch with reduced
    /// opacity looks like on a light background.
    #[must_use]
    pub fn blend_with_white(self, opacity: f64) -> Self {
        let alpha = opacity.clamp(0.0, 100.0) / 100.0;
        let blend = |c: u8| to_u8(f64::from(c).mul_add(alpha, 255.0 * (1.0 - alpha)) / 255.0);
        Self::new(blend(self.r), blend(self.g), blend(self.b))
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── HSL ─────────────────────────────────────────────────────────────────────

/// Hue/saturation/lightness over sRGB.
///
/// - `h`: degrees, any value (wrapped into 0–360 on conversion)
/// - `s`, `l`: 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// HSL from the percent-based units pickers display (`s`, `l` in 0–100).
    #[inline]
    #[must_use]
    pub fn from_percent(h: f64, s: f64, l: f64) -> Self {
        Self::new(h, s / 100.0, l / 100.0)
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = normalize_hue(self.h);
        let a = self.s * self.l.min(1.0 - self.l);
        let f = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            a.mul_add(-(k - 3.0).min(9.0 - k).min(1.0).max(-1.0), self.l)
        };
        Rgb::new(f(0.0), f(8.0), f(4.0))
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        self.to_rgb().to_oklch()
    }
}

// ─── HSV ─────────────────────────────────────────────────────────────────────

/// Hue, saturation and value: the square picker's coordinates.
///
/// - `h`: degrees, any value (wrapped into 0–360 on conversion)
/// - `s`, `v`: 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = normalize_hue(self.h);
        let f = |n: f64| {
            let k = (n + h / 60.0) % 6.0;
            (self.v * self.s).mul_add(-k.min(4.0 - k).clamp(0.0, 1.0), self.v)
        };
        Rgb::new(f(5.0), f(3.0), f(1.0))
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        self.to_rgb().to_oklch()
    }
}

// ─── OKLCH ───────────────────────────────────────────────────────────────────

/// A perceptual color in OKLCH space.
///
/// OKLCH is the cylindrical form of Oklab: perceptually uniform lightness,
/// chroma and hue, so equal numeric steps look like equal visual steps.
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white)
/// - `c`: chroma, 0.0 (gray) upward; sRGB tops out near 0.37
/// - `h`: hue angle in degrees; meaningless when `c` is ~0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// The hue angle, or `None` for an achromatic color.
    #[inline]
    #[must_use]
    pub fn hue(self) -> Option<f64> {
        (!self.is_achromatic()).then_some(self.h)
    }

    /// Whether this color has no visible chroma.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_EPSILON
    }

    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.l.is_finite() && self.c.is_finite() && self.h.is_finite()
    }

    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    #[inline]
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let h_rad = self.h.to_radians();
        Oklab::new(self.l, self.c * h_rad.cos(), self.c * h_rad.sin())
    }

    /// Convert to sRGB without any gamut mapping.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        self.to_oklab().to_rgb()
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.1})", self.l, self.c, self.h)
    }
}

// ─── Oklab ───────────────────────────────────────────────────────────────────

/// Cartesian Oklab coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Achromatic results get hue 0.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let c = self.a.hypot(self.b);
        let h = if c < ACHROMATIC_EPSILON {
            0.0
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };
        Oklch::new(self.l, c, h)
    }

    #[must_use]
    pub fn to_linear_srgb(self) -> (f64, f64, f64) {
        oklab_to_linear_srgb(self.l, self.a, self.b)
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = self.to_linear_srgb();
        Rgb::new(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
    }

    #[must_use]
    pub fn to_lab(self) -> Lab {
        let (r, g, b) = self.to_linear_srgb();
        linear_srgb_to_lab(r, g, b)
    }
}

// ─── CIELAB ──────────────────────────────────────────────────────────────────

/// CIELAB relative to the D65 white point. Only used for CIEDE2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

// ─── Conversion Functions ────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // A tiny negative angle rounds up to exactly 360.
    if h >= 360.0 { 0.0 } else { h }
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// Through the intermediate LMS (cone response) space.

#[inline]
fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_757_309_913_6f64.mul_add(b, 0.396_337_777_376_174_9f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_825_813_3f64.mul_add(-b, 0.105_561_345_815_658_6f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_019_409_2f64.mul_add(-b, 0.089_484_177_529_811_9f64.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_903_182_104_3f64.mul_add(s, 4.076_741_636_075_958_3f64.mul_add(l, -(3.307_711_539_258_062_9 * m)));
    let g = 0.341_319_376_002_546_7f64.mul_add(-s, (-1.268_437_973_285_031_5f64).mul_add(l, 2.609_757_349_287_688_2 * m));
    let bl = 1.707_614_694_074_611_7f64.mul_add(s, (-0.004_196_076_138_675_6f64).mul_add(l, -(0.703_418_617_935_936_2 * m)));

    (r, g, bl)
}

#[inline]
fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> Oklab {
    // Linear sRGB → LMS
    let l = 0.051_445_993_267_502_2f64.mul_add(b, 0.412_221_469_470_763f64.mul_add(r, 0.536_332_537_261_734_8 * g));
    let m = 0.107_396_953_536_940_6f64.mul_add(b, 0.211_903_495_817_825_2f64.mul_add(r, 0.680_699_550_634_234_4 * g));
    let s = 0.629_978_701_673_822_2f64.mul_add(b, 0.088_302_459_190_056_4f64.mul_add(r, 0.281_718_839_136_121_5 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab::new(
        0.004_072_043_011_619_3f64.mul_add(-s_, 0.210_454_268_309_314f64.mul_add(l_, 0.793_617_774_702_305_4 * m_)),
        0.450_593_709_617_411f64.mul_add(s_, 1.977_998_532_431_168_4f64.mul_add(l_, -(2.428_592_242_048_58 * m_))),
        0.808_675_754_923_077_4f64.mul_add(-s_, 0.025_904_042_465_547_8f64.mul_add(l_, 0.782_771_712_457_529_6 * m_)),
    )
}

// ─── Linear sRGB → CIELAB (D65) ─────────────────────────────────────────────

/// D65 reference white in XYZ, derived from the chromaticity (0.3127, 0.3290).
const WHITE_D65: (f64, f64, f64) = (0.3127 / 0.329, 1.0, (1.0 - 0.3127 - 0.329) / 0.329);

/// CIE ε = 216 / 24389.
const LAB_E: f64 = 216.0 / 24_389.0;

/// CIE κ = 24389 / 27.
const LAB_K: f64 = 24_389.0 / 27.0;

#[inline]
fn linear_srgb_to_lab(r: f64, g: f64, b: f64) -> Lab {
    let x = 0.180_480_788_401_834_3f64.mul_add(b, 0.412_390_799_265_959_3f64.mul_add(r, 0.357_584_339_383_878 * g));
    let y = 0.072_192_315_360_733_7f64.mul_add(b, 0.212_639_005_871_510_2f64.mul_add(r, 0.715_168_678_767_756 * g));
    let z = 0.950_532_152_249_660_7f64.mul_add(b, 0.019_330_818_715_591_8f64.mul_add(r, 0.119_194_779_794_626 * g));

    let f = |v: f64| {
        if v > LAB_E { v.cbrt() } else { LAB_K.mul_add(v, 16.0) / 116.0 }
    };
    let fx = f(x / WHITE_D65.0);
    let fy = f(y / WHITE_D65.1);
    let fz = f(z / WHITE_D65.2);

    Lab::new(116.0f64.mul_add(fy, -16.0), 500.0 * (fx - fy), 200.0 * (fy - fz))
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────
//
// The piecewise sRGB transfer function, mirrored through zero so negative
// (out-of-gamut) channels keep their sign.

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    let abs = c.abs();
    if abs > 0.003_130_8 {
        1.055f64.mul_add(abs.powf(1.0 / 2.4), -0.055).copysign(c)
    } else {
        c * 12.92
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.040_45 {
        c / 12.92
    } else {
        ((abs + 0.055) / 1.055).powf(2.4).copysign(c)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb8::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Rgb8::new(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255), rounding half up.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // NaN maps to 0: the `as` cast saturates.
    v.clamp(0.0, 1.0).mul_add(255.0, 0.5).floor() as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
