//! # oklrch-ramp — palette ramps in OKLCH
//!
//! Turns one seed color and a list of lightness rails into a ramp of
//! displayable sRGB swatches that keeps the seed's hue and chroma as far
//! as the gamut allows, and reports which swatch reproduces the seed.
//!
//! # Architecture
//!
//! ```text
//! seed (OKLCH, or HSL via adapter) + rails (0–100)
//!     │
//!     ▼
//! ramp.rs:     validate, classify neutral (c < 0.02)
//!     │
//!     ▼
//! warmth.rs:   shift yellow hues toward orange on dark rails
//!     │
//!     ▼
//! oklrch-color: OKLCH → sRGB gamut mapping, hex
//!     │
//!     ▼
//! ramp.rs:     anchor = min CIEDE2000 to the seed, fidelity warning
//! ```
//!
//! Alongside the generator:
//!
//! - `gamut.rs`: the sRGB chroma ceiling per lightness for a hue, cached.
//! - `isobar.rs`: the curve of equal OKLCH lightness across an HSV square.
//! - `rail.rs`: bezier-distributed rail lightnesses and curve presets.
//! - `contrast.rs`: WCAG contrast for labelling swatches.
//! - `settings.rs`: `name=value` ramp configuration.
//!
//! # Color Space
//!
//! Everything happens in OKLCH. Rails are OKLCH lightness in percent;
//! the only sRGB values that leave this crate are gamut-mapped.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Loop indices and sample counts become lightness fractions.
#![allow(clippy::cast_precision_loss)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// Rounded rails and hue keys are small and already clamped.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod contrast;
pub mod error;
pub mod gamut;
pub mod isobar;
pub mod rail;
pub mod ramp;
pub mod settings;
pub mod warmth;

pub use error::{InvalidInput, RampError};
pub use gamut::{BoundaryCache, BoundaryPoint};
pub use isobar::{IsobarPoint, IsobarSegment};
pub use rail::{Curve, CurvePreset};
pub use ramp::{Ramp, Swatch, generate_oklch_ramp, generate_ramp, generate_ramp_from_hsl};
pub use settings::RampSettings;
