// SPDX-License-Identifier: MIT
//
// oklrch-color — color spaces for the OKLrCH ramp engine.
//
// Conversions between sRGB, HSL, HSV and OKLCH (through Oklab and linear sRGB),
// CIELAB for CIEDE2000, CSS Color 4 style gamut mapping into sRGB, hex
// formatting and parsing, and truecolor escape sequences for previews.
//
// The definitions match the ones browsers and the common JavaScript color
// libraries use (Ottosson's Oklab matrices, the sRGB transfer curve, a D65
// white point), so a ramp computed here renders the same hex values a web
// front end would.

pub mod ansi;
pub mod color;
pub mod difference;
pub mod gamut;

pub use color::{Color, Hsl, Hsv, Lab, Oklab, Oklch, Rgb, Rgb8};
pub use difference::{ciede2000, delta_e_ok, difference_ciede2000};
