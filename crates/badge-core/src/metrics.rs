//! Per-glyph advance measurement.

use embedded_graphics::{
    prelude::Point,
    text::{Baseline, renderer::TextRenderer},
};

/// Width in pixels of `c` rendered alone in `style`.
///
/// Control characters are measured like any other glyph; whatever the font
/// reports is used as-is.
pub fn glyph_width<S>(style: &S, c: char) -> u32
where
    S: TextRenderer,
{
    let mut utf8 = [0u8; 4];
    let glyph = c.encode_utf8(&mut utf8);

    style
        .measure_string(glyph, Point::zero(), Baseline::Top)
        .bounding_box
        .size
        .width
}
