// SPDX-License-Identifier: MIT
//
// Seed color parsing for the command line.
//
// Three spellings are accepted, CSS-like:
//
//   #a33460 / a33460 / #a36     hex sRGB
//   oklch(0.5 0.15 0)           L as 0–1 or percent, commas optional
//   hsl(330 52% 42%)            S and L in percent, % optional
//
// Each maps onto one of the ramp generator's entry points.

use std::fmt;

use oklrch_color::{Oklch, Rgb8};
use oklrch_ramp::{Ramp, RampError, generate_ramp, generate_ramp_from_hsl};
use regex::Regex;

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

/// A seed color as the user wrote it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    Hex(Rgb8),
    Oklch(Oklch),
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { h: f64, s: f64, l: f64 },
}

impl Seed {
    /// Generate this seed's ramp on `rails`.
    pub fn ramp(self, rails: &[f64]) -> Result<Ramp, RampError> {
        match self {
            Self::Hex(rgb) => {
                let lch = rgb.to_rgb().to_oklch();
                generate_ramp(lch.with_lightness(lch.l.clamp(0.0, 1.0)), rails)
            }
            Self::Oklch(lch) => generate_ramp(lch, rails),
            Self::Hsl { h, s, l } => generate_ramp_from_hsl(h, s, l, rails),
        }
    }
}

/// The seed text matched none of the accepted forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedError {
    pub input: String,
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot read seed color '{}' (expected #rrggbb, oklch(L C H) or hsl(H S L))",
            self.input
        )
    }
}

impl std::error::Error for SeedError {}

/// Compiled seed patterns.
#[derive(Debug)]
pub struct SeedParser {
    oklch: Regex,
    hsl: Regex,
}

impl SeedParser {
    pub fn new() -> Result<Self, regex::Error> {
        let sep = r"\s*[\s,]\s*";
        let oklch = format!(r"(?i)^oklch\(\s*({NUMBER})(%?){sep}({NUMBER}){sep}({NUMBER})(?:deg)?\s*\)$");
        let hsl = format!(r"(?i)^hsl\(\s*({NUMBER})(?:deg)?{sep}({NUMBER})%?{sep}({NUMBER})%?\s*\)$");
        Ok(Self { oklch: Regex::new(&oklch)?, hsl: Regex::new(&hsl)? })
    }

    pub fn parse(&self, input: &str) -> Result<Seed, SeedError> {
        let text = input.trim();
        let error = || SeedError { input: input.to_string() };

        if let Some(caps) = self.oklch.captures(text) {
            let num = |i: usize| caps[i].parse::<f64>().map_err(|_| error());
            let mut l = num(1)?;
            if &caps[2] == "%" {
                l /= 100.0;
            }
            return Ok(Seed::Oklch(Oklch::new(l, num(3)?, num(4)?)));
        }

        if let Some(caps) = self.hsl.captures(text) {
            let num = |i: usize| caps[i].parse::<f64>().map_err(|_| error());
            return Ok(Seed::Hsl { h: num(1)?, s: num(2)?, l: num(3)? });
        }

        Rgb8::parse_hex(text).map(Seed::Hex).ok_or_else(error)
    }
}

/// Split argv into the seed text and the remaining settings.
///
/// A functional seed may arrive unquoted and split by the shell
/// (`oklch(0.5` `0.15` `0)`); its pieces are joined back up to the
/// argument holding the closing parenthesis.
pub fn split_seed(args: &[String]) -> Option<(String, &[String])> {
    let first = args.first()?;
    if !first.contains('(') || first.contains(')') {
        return Some((first.clone(), &args[1..]));
    }
    let end = args.iter().position(|a| a.contains(')')).unwrap_or(args.len() - 1);
    Some((args[..=end].join(" "), &args[end + 1..]))
}
