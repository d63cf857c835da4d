//! Fixed-width glyph progress bars.

use super::Palette;

/// Default bar width in glyphs.
pub const BAR_WIDTH: usize = 20;

/// Glyph for the unfilled part of every bar.
pub const EMPTY_GLYPH: char = '─';

/// Number of filled cells for `value` out of `max_value`.
///
/// The result is clamped to `[0, width]`; a non-positive maximum or a
/// non-finite ratio gives an empty bar.
pub fn filled_cells(value: f64, max_value: f64, width: usize) -> usize {
    if max_value <= 0.0 {
        return 0;
    }
    let filled = (value * width as f64 / max_value).floor();
    if !filled.is_finite() || filled <= 0.0 {
        0
    } else {
        (filled as usize).min(width)
    }
}

/// Build an uncolored bar of exactly `width` glyphs.
pub fn bar_glyphs(value: f64, max_value: f64, width: usize, fill: char, empty: char) -> String {
    let filled = filled_cells(value, max_value, width);
    let mut bar = String::with_capacity(width * fill.len_utf8());
    bar.extend(std::iter::repeat(fill).take(filled));
    bar.extend(std::iter::repeat(empty).take(width - filled));
    bar
}

/// Build a bar wrapped in the palette's bar color.
pub fn progress_bar(value: f64, max_value: f64, fill: char, palette: &Palette) -> String {
    palette.bar(&bar_glyphs(value, max_value, BAR_WIDTH, fill, EMPTY_GLYPH))
}
