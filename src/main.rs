// SPDX-License-Identifier: MIT
//
// oklrch — gamut-aware OKLCH palette ramps from one seed color.
//
// This is the command-line front end that wires the crates together:
//
//   oklrch-color → color spaces, gamut mapping, hex, ANSI swatches
//   oklrch-ramp  → rails, ramp generation, contrast, settings
//
// One run flows through:
//
//   argv → seed text + name=value settings → RampSettings → rails
//        → generate_ramp → one line per swatch on stdout
//
// Usage:
//
//   oklrch <seed> [setting=value ...]
//
//   oklrch '#a33460'
//   oklrch 'oklch(0.62 0.19 250)' steps=11 curve=tint-focus
//   oklrch 'hsl(40 90% 45%)' min=10 max=90 nocolor
//
// Defaults for the settings can be kept in OKLRCH_SETTINGS
// ("steps=9 nocolor"); arguments override them.

mod logging;
mod render;
mod seed;

use std::env;
use std::io::{self, BufWriter, Write};
use std::process;

use anyhow::{Context, bail};
use log::debug;
use oklrch_ramp::settings::{parse_setting, parse_settings};
use oklrch_ramp::{CurvePreset, RampSettings};

use crate::logging::{LoggingConfig, init_logging};
use crate::seed::{SeedParser, split_seed};

const USAGE: &str = "usage: oklrch <seed> [setting=value ...]

seed:      #rrggbb | oklch(L C H) | hsl(H S L)
settings:  min=5 max=95 steps=7 curve=uniform opacity=100 color=on";

/// Environment variable holding default settings.
const SETTINGS_VAR: &str = "OKLRCH_SETTINGS";

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    init_logging(&LoggingConfig::default());

    let args: Vec<String> = env::args().skip(1).collect();
    let defaults = env::var(SETTINGS_VAR).ok();
    let stdout = io::stdout().lock();
    if let Err(e) = run(&args, defaults.as_deref(), &mut BufWriter::new(stdout)) {
        eprintln!("oklrch: {e:#}");
        process::exit(1);
    }
}

/// Parse `args` on top of the `defaults` settings string, generate the
/// ramp and write it to `out`.
fn run(args: &[String], defaults: Option<&str>, out: &mut impl Write) -> anyhow::Result<()> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        write_help(out)?;
        return Ok(out.flush()?);
    }
    let Some((seed_text, rest)) = split_seed(args) else {
        bail!("missing seed color\n\n{USAGE}");
    };

    let parser = SeedParser::new().context("compiling seed patterns")?;
    let seed = parser.parse(&seed_text)?;

    let mut settings = RampSettings::default();
    if let Some(defaults) = defaults {
        settings.apply_all(parse_settings(defaults).with_context(|| format!("in {SETTINGS_VAR}"))?);
    }
    for arg in rest {
        settings.apply(parse_setting(arg)?);
    }
    let rails = settings.rails();
    debug!("seed {seed:?}, rails {rails:?}");

    let ramp = seed.ramp(&rails)?;
    render::write_ramp(out, &ramp, &settings)?;
    out.flush()?;
    Ok(())
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{USAGE}")?;
    writeln!(out, "\ncurves:")?;
    for preset in CurvePreset::ALL {
        writeln!(out, "  {:<16}{}", preset.name(), preset.description())?;
    }
    writeln!(out, "\n{SETTINGS_VAR} holds default settings, e.g. \"steps=9 nocolor\".")
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_with(defaults: Option<&str>, args: &[&str]) -> anyhow::Result<String> {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let mut out = Vec::new();
        run(&args, defaults, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        run_with(None, args)
    }

    #[test]
    fn prints_a_ramp() {
        let out = run_args(&["oklch(0.5 0.15 0)", "nocolor"]).unwrap();
        assert_eq!(out.lines().count(), 9);
        assert!(out.contains("L50  #a33460"), "{out}");
    }

    #[test]
    fn settings_shape_the_rails() {
        let out = run_args(&["#a33460", "n=3", "min=10", "max=90", "color=off"]).unwrap();
        let labels: Vec<&str> =
            out.lines().skip(1).take(3).map(|l| l.split_whitespace().next().unwrap()).collect();
        assert_eq!(labels, vec!["L90", "L50", "L10"]);
    }

    #[test]
    fn unquoted_functional_seed() {
        let out = run_args(&["hsl(336", "52%", "42%)", "nocolor"]).unwrap();
        assert!(out.starts_with("oklch("), "{out}");
    }

    #[test]
    fn help_prints_usage() {
        let out = run_args(&["--help"]).unwrap();
        assert!(out.starts_with("usage: oklrch"));
        assert!(out.contains("  Shadow Focus    More steps among the dark shades\n"), "{out}");
        assert!(out.contains("OKLRCH_SETTINGS"));
    }

    #[test]
    fn environment_defaults_yield_to_arguments() {
        let out = run_with(Some("n=3 nocolor"), &["#a33460"]).unwrap();
        assert!(out.contains(" · 3 rails · "), "{out}");
        assert!(!out.contains('\x1b'));

        let out = run_with(Some("n=3 nocolor"), &["#a33460", "n=5"]).unwrap();
        assert!(out.contains(" · 5 rails · "), "{out}");
    }

    #[test]
    fn bad_environment_defaults_are_reported() {
        let err = run_with(Some("steps=9 bogus=1"), &["#a33460"]).unwrap_err();
        assert_eq!(format!("{err:#}"), "in OKLRCH_SETTINGS: setting 'bogus': unknown setting");
    }

    #[test]
    fn errors_are_reported() {
        let err = run_args(&[]).unwrap_err();
        assert!(err.to_string().starts_with("missing seed color"));

        let err = run_args(&["chartreuse"]).unwrap_err();
        assert!(err.to_string().starts_with("cannot read seed color 'chartreuse'"));

        let err = run_args(&["#a33460", "hue=5"]).unwrap_err();
        assert_eq!(err.to_string(), "setting 'hue': unknown setting");

        let err = run_args(&["oklch(1.5 0.1 0)"]).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: seed lightness 1.5 is out of range");
    }
}
