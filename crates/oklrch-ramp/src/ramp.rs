//! Ramp generation.
//!
//! A ramp renders one seed color on every lightness rail: the seed's
//! chroma and (warmth-corrected) hue at the rail's lightness, pulled into
//! sRGB by gamut mapping. The swatch that looks most like the seed under
//! CIEDE2000 is the ramp's anchor. When even the anchor is visibly off
//! (ΔE00 > 2.5) the rails simply have no slot near the seed's lightness,
//! and the ramp carries a warning.
//!
//! Seeds with chroma below [`NEUTRAL_CHROMA`] are grays. Their ramps skip
//! warmth correction and never warn.

use log::{debug, trace, warn};
use oklrch_color::{Hsl, Oklch, Rgb, Rgb8, difference_ciede2000};

use crate::error::{InvalidInput, RampError};
use crate::warmth::apply_warmth_correction;

/// Seeds with less chroma than this are neutral.
pub const NEUTRAL_CHROMA: f64 = 0.02;

/// Anchor ΔE00 above which the seed counts as not reproduced.
pub const WARNING_DELTA_E: f64 = 2.5;

/// Largest seed chroma accepted. No displayable color comes near it.
pub const MAX_SEED_CHROMA: f64 = 1.0;

/// One rendered rail.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    /// Rail lightness in percent.
    pub rail: f64,
    /// `#rrggbb`, lower case.
    pub hex: String,
    /// The gamut-mapped color, before 8-bit quantization.
    pub rgb: Rgb,
    /// `rgb` back in OKLCH: what the swatch actually looks like.
    pub oklch: Oklch,
}

impl Swatch {
    fn render(seed: Oklch, rail: f64, neutral: bool) -> Self {
        let lightness = rail / 100.0;
        let hue = if neutral {
            seed.h
        } else {
            apply_warmth_correction(seed.hue(), lightness).unwrap_or(seed.h)
        };
        let rgb = Oklch::new(lightness, seed.c, hue).to_gamut();
        let swatch = Self { rail, hex: rgb.to_hex(), rgb, oklch: rgb.to_oklch() };
        trace!("rail {rail}: hue {hue:.2} -> {} ({})", swatch.hex, swatch.oklch);
        swatch
    }

    /// The swatch quantized to 8 bits per channel.
    #[must_use]
    pub fn rgb8(&self) -> Rgb8 {
        self.rgb.to_rgb8()
    }
}

/// A generated ramp: one swatch per rail, in rail order.
///
/// Only [`generate_ramp`] builds one, so there is always at least one
/// swatch and the anchor index is in range.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    seed: Oklch,
    swatches: Vec<Swatch>,
    anchor_index: usize,
    anchor_delta_e: f64,
    warning: bool,
}

impl Ramp {
    /// The validated seed (hue normalized).
    #[must_use]
    pub const fn seed(&self) -> Oklch {
        self.seed
    }

    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Index of the swatch closest to the seed.
    #[must_use]
    pub const fn anchor_index(&self) -> usize {
        self.anchor_index
    }

    /// CIEDE2000 between the seed and the anchor swatch.
    #[must_use]
    pub const fn anchor_delta_e(&self) -> f64 {
        self.anchor_delta_e
    }

    /// The seed is chromatic and no swatch reproduces it.
    #[must_use]
    pub const fn has_warning(&self) -> bool {
        self.warning
    }

    /// Hex strings in rail order.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        self.swatches.iter().map(|s| s.hex.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Never true for a generated ramp.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.seed.c < NEUTRAL_CHROMA
    }

    /// The swatch that stands in for the seed.
    #[must_use]
    pub fn anchor(&self) -> &Swatch {
        &self.swatches[self.anchor_index]
    }

    /// The swatch with the most rendered chroma; the first one on ties.
    ///
    /// This is the ramp's most saturated expression of its hue, useful as
    /// an icon or accent color.
    #[must_use]
    pub fn most_chromatic(&self) -> &Swatch {
        let mut best = &self.swatches[0];
        for swatch in &self.swatches[1..] {
            if swatch.oklch.c > best.oklch.c {
                best = swatch;
            }
        }
        best
    }
}

/// Generate a ramp for an OKLCH seed across `rails` (lightness percent).
///
/// # Errors
///
/// [`RampError::InvalidInput`] if `rails` is empty, a rail is outside
/// 0–100 or non-finite, or the seed has a non-finite component, lightness
/// outside 0–1 or chroma outside 0–[`MAX_SEED_CHROMA`].
/// [`RampError::NonFiniteDistance`] if a color difference cannot be
/// computed.
pub fn generate_ramp(seed: Oklch, rails: &[f64]) -> Result<Ramp, RampError> {
    let seed = validate_seed(seed)?;
    validate_rails(rails)?;

    let neutral = seed.c < NEUTRAL_CHROMA;
    let kind = if neutral { " (neutral)" } else { "" };
    debug!("generating {} swatches for {seed}{kind}", rails.len());

    let swatches: Vec<Swatch> =
        rails.iter().map(|&rail| Swatch::render(seed, rail, neutral)).collect();
    let (anchor_index, anchor_delta_e) = find_anchor(seed, &swatches)?;

    let warning = !neutral && anchor_delta_e > WARNING_DELTA_E;
    if warning {
        let anchor = &swatches[anchor_index];
        warn!(
            "{seed} is not reproduced by any rail: closest is {} on rail {} (ΔE00 {anchor_delta_e:.2})",
            anchor.hex, anchor.rail
        );
    }

    Ok(Ramp { seed, swatches, anchor_index, anchor_delta_e, warning })
}

/// [`generate_ramp`] taking the seed as separate hue, chroma and
/// lightness (0–1).
///
/// # Errors
///
/// As [`generate_ramp`].
pub fn generate_oklch_ramp(
    hue: f64,
    chroma: f64,
    lightness: f64,
    rails: &[f64],
) -> Result<Ramp, RampError> {
    generate_ramp(Oklch::new(lightness, chroma, hue), rails)
}

/// [`generate_ramp`] for an HSL seed, `saturation` and `lightness` in
/// percent.
///
/// # Errors
///
/// [`RampError::InvalidInput`] if the hue is non-finite or saturation or
/// lightness fall outside 0–100; otherwise as [`generate_ramp`].
pub fn generate_ramp_from_hsl(
    hue: f64,
    saturation: f64,
    lightness: f64,
    rails: &[f64],
) -> Result<Ramp, RampError> {
    check("hue", hue, hue.is_finite())?;
    check("saturation", saturation, (0.0..=100.0).contains(&saturation))?;
    check("lightness", lightness, (0.0..=100.0).contains(&lightness))?;
    let seed = Hsl::from_percent(hue, saturation, lightness).to_oklch();
    // White converts to a lightness a hair above 1.
    generate_ramp(seed.with_lightness(seed.l.clamp(0.0, 1.0)), rails)
}

fn check(component: &'static str, value: f64, ok: bool) -> Result<(), InvalidInput> {
    if ok { Ok(()) } else { Err(InvalidInput::Seed { component, value }) }
}

fn validate_seed(seed: Oklch) -> Result<Oklch, InvalidInput> {
    check("lightness", seed.l, (0.0..=1.0).contains(&seed.l))?;
    check("chroma", seed.c, (0.0..=MAX_SEED_CHROMA).contains(&seed.c))?;
    check("hue", seed.h, seed.h.is_finite())?;
    Ok(seed.with_hue(seed.h))
}

fn validate_rails(rails: &[f64]) -> Result<(), InvalidInput> {
    if rails.is_empty() {
        return Err(InvalidInput::EmptyRails);
    }
    match rails.iter().position(|rail| !(0.0..=100.0).contains(rail)) {
        Some(index) => Err(InvalidInput::Rail { index, value: rails[index] }),
        None => Ok(()),
    }
}

/// Index and distance of the swatch closest to `seed`; earliest on ties.
fn find_anchor(seed: Oklch, swatches: &[Swatch]) -> Result<(usize, f64), RampError> {
    let mut best: Option<(usize, f64)> = None;
    for (index, swatch) in swatches.iter().enumerate() {
        let distance = difference_ciede2000(seed, swatch.rgb);
        if distance.is_nan() {
            return Err(RampError::NonFiniteDistance { index });
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best.ok_or(RampError::InvalidInput(InvalidInput::EmptyRails))
}
