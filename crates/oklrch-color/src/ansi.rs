// SPDX-License-Identifier: MIT
//
// ANSI escape sequences for previewing colors in a terminal.
//
// Pure functions that write 24-bit SGR sequences to any `impl Write`. The
// CLI uses them to paint a block of each swatch next to its hex value.
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

use crate::color::Rgb8;

/// Reset all attributes (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground (text) color as 24-bit `TrueColor`.
#[inline]
pub fn fg(w: &mut impl Write, color: Rgb8) -> io::Result<()> {
    let Rgb8 { r, g, b } = color;
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Set the background color as 24-bit `TrueColor`.
#[inline]
pub fn bg(w: &mut impl Write, color: Rgb8) -> io::Result<()> {
    let Rgb8 { r, g, b } = color;
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

/// Paint `width` cells of solid `color`, then reset.
pub fn swatch(w: &mut impl Write, color: Rgb8, width: usize) -> io::Result<()> {
    bg(w, color)?;
    write!(w, "{:width$}", "")?;
    reset(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Run a writer function and return the output as a String.
    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn fg_rgb() {
        assert_eq!(
            emit(|w| fg(w, Rgb8::new(255, 128, 0))),
            "\x1b[38;2;255;128;0m"
        );
    }

    #[test]
    fn bg_rgb() {
        assert_eq!(
            emit(|w| bg(w, Rgb8::new(0, 100, 200))),
            "\x1b[48;2;0;100;200m"
        );
    }

    #[test]
    fn swatch_pads_and_resets() {
        assert_eq!(
            emit(|w| swatch(w, Rgb8::new(1, 2, 3), 4)),
            "\x1b[48;2;1;2;3m    \x1b[0m"
        );
    }
}
