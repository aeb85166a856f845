// SPDX-License-Identifier: MIT
//
// Text rendering of a ramp.
//
//   oklch(0.5000 0.1500 0.0) · 7 rails · Uniform
//     Aa   L95  #ffe4ee  black 17.29:1  AAA
//   ...
//     Aa   L50  #a33460  white  6.53:1  AA        ◀ anchor
//   ...
//   ██████ accent L50 #a33460
//
// The "Aa" block is a truecolor swatch with sample text in the better of
// white or black (left out when color is off). Contrast is measured
// against the color as previewed, i.e. after blending with white at the
// configured opacity. The accent is the ramp's most chromatic swatch.

use std::io::{self, Write};

use oklrch_color::ansi;
use oklrch_ramp::contrast::best_text_contrast;
use oklrch_ramp::rail::nearest_rail;
use oklrch_ramp::{Ramp, RampSettings};

/// Width of a painted swatch, in cells.
const SWATCH_WIDTH: usize = 6;

const SAMPLE_TEXT: &str = "Aa";

/// Write `ramp` as one line per swatch in rail order, then the accent
/// line, then a warning line when the seed was not reproduced.
pub fn write_ramp(w: &mut impl Write, ramp: &Ramp, settings: &RampSettings) -> io::Result<()> {
    writeln!(w, "{} · {} rails · {}", ramp.seed(), ramp.len(), settings.curve_name())?;

    for (i, swatch) in ramp.swatches().iter().enumerate() {
        let shown = swatch.rgb8().blend_with_white(settings.opacity);
        let text = best_text_contrast(shown.to_rgb());
        if settings.color {
            ansi::bg(w, shown)?;
            ansi::fg(w, text.text_color().to_rgb8())?;
            write!(w, "{SAMPLE_TEXT:^SWATCH_WIDTH$}")?;
            ansi::reset(w)?;
            w.write_all(b" ")?;
        }

        let mut line = format!(
            "L{:<4}{}  {} {:>5.2}:1  {:<8}",
            swatch.rail,
            swatch.hex,
            if text.on_white { "white" } else { "black" },
            text.ratio,
            text.rating,
        );
        if i == ramp.anchor_index() {
            line.push_str("  ◀ anchor");
        }
        writeln!(w, "{}", line.trim_end())?;
    }

    let accent = ramp.most_chromatic();
    if settings.color {
        ansi::swatch(w, accent.rgb8().blend_with_white(settings.opacity), SWATCH_WIDTH)?;
        w.write_all(b" ")?;
    }
    writeln!(w, "accent L{} {}", accent.rail, accent.hex)?;

    if ramp.has_warning() {
        let anchor = ramp.anchor();
        write!(
            w,
            "warning: {} is not reproduced by any rail; closest is L{} {} (ΔE00 {:.2})",
            ramp.seed(),
            anchor.rail,
            anchor.hex,
            ramp.anchor_delta_e()
        )?;
        let rails: Vec<f64> = ramp.swatches().iter().map(|s| s.rail).collect();
        if let Some(i) = nearest_rail(&rails, ramp.seed().l) {
            write!(w, ", nearest by lightness L{}", rails[i])?;
        }
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oklrch_color::Oklch;
    use oklrch_ramp::generate_ramp;
    use oklrch_ramp::settings::Setting;
    use pretty_assertions::assert_eq;

    fn plain() -> RampSettings {
        RampSettings { color: false, ..RampSettings::default() }
    }

    fn render(seed: Oklch, settings: &RampSettings) -> String {
        let ramp = generate_ramp(seed, &settings.rails()).unwrap();
        let mut out = Vec::new();
        write_ramp(&mut out, &ramp, settings).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_and_one_line_per_rail() {
        let out = render(Oklch::new(0.5, 0.15, 0.0), &plain());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "oklch(0.5000 0.1500 0.0) · 7 rails · Uniform");
        assert!(lines[1].starts_with("L95  #"), "{}", lines[1]);
        assert!(lines[7].starts_with("L5   #"), "{}", lines[7]);
    }

    #[test]
    fn anchor_line_is_marked() {
        let out = render(Oklch::new(0.5, 0.15, 0.0), &plain());
        let anchors: Vec<&str> = out.lines().filter(|l| l.ends_with("◀ anchor")).collect();
        assert_eq!(anchors, vec!["L50  #a33460  white  6.53:1  AA        ◀ anchor"]);
    }

    #[test]
    fn accent_is_the_most_chromatic_swatch() {
        let seed = Oklch::new(0.5, 0.15, 0.0);
        let settings = plain();
        let ramp = generate_ramp(seed, &settings.rails()).unwrap();
        let accent = ramp.most_chromatic();

        let out = render(seed, &settings);
        assert_eq!(out.lines().last(), Some(format!("accent L{} {}", accent.rail, accent.hex).as_str()));
    }

    #[test]
    fn warning_line_follows_the_swatches() {
        let mut settings = plain();
        settings.apply(Setting::Steps(3));
        let out = render(Oklch::new(0.4, 0.1, 90.0), &settings);
        let lines: Vec<&str> = out.lines().collect();
        let last = lines[lines.len() - 1];
        assert!(lines[lines.len() - 2].starts_with("accent L"), "{out}");
        assert!(last.starts_with("warning: oklch(0.4000 0.1000 90.0)"), "{last}");
        assert!(last.contains("closest is L50 #"), "{last}");
        assert!(last.ends_with(", nearest by lightness L50"), "{last}");
    }

    #[test]
    fn zero_opacity_previews_white() {
        let settings = RampSettings { opacity: 0.0, ..plain() };
        let out = render(Oklch::new(0.5, 0.15, 0.0), &settings);
        let rails: Vec<&str> = out.lines().filter(|l| l.starts_with('L')).collect();
        assert_eq!(rails.len(), 7);
        assert!(rails.iter().all(|l| l.contains("black 21.00:1  AAA")), "{out}");
    }

    #[test]
    fn color_output_paints_each_swatch() {
        let out = render(Oklch::new(0.5, 0.15, 0.0), &RampSettings::default());
        let anchor = out.lines().find(|l| l.ends_with("◀ anchor")).unwrap();
        assert!(
            anchor.starts_with("\x1b[48;2;163;52;96m\x1b[38;2;255;255;255m  Aa  \x1b[0m L50"),
            "{anchor:?}"
        );
        assert_eq!(out.matches("\x1b[0m").count(), 8);

        let accent = out.lines().last().unwrap();
        assert!(accent.starts_with("\x1b[48;2;"), "{accent:?}");
        assert!(accent.contains("\x1b[0m accent L"), "{accent:?}");
    }
}
