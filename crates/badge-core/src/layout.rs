//! Bounded text flow with per-character wrapping, tab stops and CR/LF handling.
//!
//! Layout arithmetic lives on an explicit [`LayoutCursor`]; pixels only ever
//! reach the screen through a [`GlyphSurface`], so the flow can be exercised
//! against a recording fake as well as a real framebuffer.

use embedded_graphics::{
    Drawable,
    mono_font::MonoFont,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point},
    text::{Baseline, Text, renderer::TextRenderer},
};
use log::debug;

use crate::metrics::glyph_width;

/// Columns between two tab stops.
pub const TAB_STOP: u8 = 8;

/// Vertical line spacing used by the reference configuration.
pub const DEFAULT_LINE_GAP: u32 = 2;

/// How the cursor `y` relates to the glyphs drawn on that line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineAnchor {
    /// `y` is the top of a fixed-height glyph cell.
    TopAnchored { height: u32 },
    /// `y` is the baseline; glyphs rise `ascent` pixels above it.
    BaselineAnchored { ascent: u32 },
}

impl LineAnchor {
    pub const fn baseline(self) -> Baseline {
        match self {
            Self::TopAnchored { .. } => Baseline::Top,
            Self::BaselineAnchored { .. } => Baseline::Alphabetic,
        }
    }
}

/// Line metrics of the single active font.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FontMetrics {
    pub anchor: LineAnchor,
    pub line_gap: u32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::top_anchored(9, DEFAULT_LINE_GAP)
    }
}

impl FontMetrics {
    pub const fn top_anchored(height: u32, line_gap: u32) -> Self {
        Self {
            anchor: LineAnchor::TopAnchored { height },
            line_gap,
        }
    }

    pub const fn baseline_anchored(ascent: u32, line_gap: u32) -> Self {
        Self {
            anchor: LineAnchor::BaselineAnchored { ascent },
            line_gap,
        }
    }

    /// Derives metrics from a monospace font.
    ///
    /// `Baseline::Alphabetic` yields a baseline-anchored layout, anything else
    /// is treated as top-anchored on the full character cell.
    pub fn from_mono_font(font: &MonoFont<'_>, baseline: Baseline, line_gap: u32) -> Self {
        match baseline {
            Baseline::Alphabetic => Self::baseline_anchored(font.baseline, line_gap),
            _ => Self::top_anchored(font.character_size.height, line_gap),
        }
    }

    /// Vertical distance between two consecutive lines.
    pub const fn line_advance(&self) -> i32 {
        let magnitude = match self.anchor {
            LineAnchor::TopAnchored { height } => height,
            LineAnchor::BaselineAnchored { ascent } => ascent,
        };
        (magnitude + self.line_gap) as i32
    }

    /// Offset from the clip top to the first line's cursor `y`.
    pub const fn first_line_offset(&self) -> i32 {
        match self.anchor {
            LineAnchor::TopAnchored { .. } => 0,
            LineAnchor::BaselineAnchored { ascent } => ascent as i32,
        }
    }

    /// Pixels a line occupies below its cursor `y`.
    pub const fn extent_below_cursor(&self) -> i32 {
        match self.anchor {
            LineAnchor::TopAnchored { height } => height as i32,
            LineAnchor::BaselineAnchored { .. } => 0,
        }
    }
}

/// Region glyphs may be laid out in. `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClipRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipRect {
    pub const fn new(origin: Point, far_corner: Point) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: far_corner.x,
            bottom: far_corner.y,
        }
    }

    /// Whether a line whose cursor sits at `y` stays above `bottom`.
    pub const fn fits_line(&self, y: i32, font: &FontMetrics) -> bool {
        y + font.extent_below_cursor() < self.bottom
    }
}

/// Virtual pen position threaded through one flow pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayoutCursor {
    pub x: i32,
    pub y: i32,
    /// Column modulo [`TAB_STOP`].
    pub column: u8,
}

impl LayoutCursor {
    pub const fn start(clip: &ClipRect, font: &FontMetrics) -> Self {
        Self {
            x: clip.left,
            y: clip.top + font.first_line_offset(),
            column: 0,
        }
    }

    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Moves to the start of the next line.
    ///
    /// Returns `false` when the new line no longer fits above `clip.bottom`.
    pub fn line_break(&mut self, clip: &ClipRect, font: &FontMetrics) -> bool {
        self.x = clip.left;
        self.y += font.line_advance();
        self.column = 0;
        clip.fits_line(self.y, font)
    }

    pub fn carriage_return(&mut self, clip: &ClipRect) {
        self.x = clip.left;
        self.column = 0;
    }

    fn overflows(&self, width: u32, clip: &ClipRect) -> bool {
        self.x + width as i32 >= clip.right
    }

    fn advance(&mut self, width: u32) {
        self.x += width as i32;
    }

    fn step_column(&mut self) {
        self.column = (self.column + 1) % TAB_STOP;
    }
}

/// Measuring and drawing seam used by [`flow`].
pub trait GlyphSurface {
    fn glyph_width(&self, c: char) -> u32;
    fn draw_glyph(&mut self, c: char, position: Point);
}

/// [`GlyphSurface`] over an `embedded-graphics` target and text style.
pub struct StyledSurface<'d, D, S> {
    target: &'d mut D,
    style: S,
    baseline: Baseline,
}

impl<'d, D, S> StyledSurface<'d, D, S> {
    pub fn new(target: &'d mut D, style: S, font: &FontMetrics) -> Self {
        Self {
            target,
            style,
            baseline: font.anchor.baseline(),
        }
    }
}

impl<D, S> GlyphSurface for StyledSurface<'_, D, S>
where
    D: DrawTarget<Color = BinaryColor>,
    S: TextRenderer<Color = BinaryColor> + Clone,
{
    fn glyph_width(&self, c: char) -> u32 {
        glyph_width(&self.style, c)
    }

    fn draw_glyph(&mut self, c: char, position: Point) {
        let mut utf8 = [0u8; 4];
        let glyph = c.encode_utf8(&mut utf8);
        let _ = Text::with_baseline(glyph, position, self.style.clone(), self.baseline)
            .draw(self.target);
    }
}

/// Lays `text` out inside `clip`, drawing every glyph that fits.
///
/// Wrapping is per character. The pass stops at the end of `text`, at the
/// first NUL, or at the first line break whose new line would cross
/// `clip.bottom`; everything after that point is dropped.
pub fn flow<S>(surface: &mut S, text: &str, clip: ClipRect, font: FontMetrics)
where
    S: GlyphSurface + ?Sized,
{
    let mut cursor = LayoutCursor::start(&clip, &font);
    if !clip.fits_line(cursor.y, &font) {
        debug!("text flow: first line at y={} does not fit", cursor.y);
        return;
    }

    for (index, c) in text.char_indices() {
        let fits = match c {
            '\0' => break,
            '\t' => expand_tab(surface, &mut cursor, &clip, &font),
            '\n' => cursor.line_break(&clip, &font),
            '\r' => {
                cursor.carriage_return(&clip);
                true
            }
            _ => place_glyph(surface, &mut cursor, c, &clip, &font),
        };

        if !fits {
            debug!(
                "text flow: truncated at byte {} of {} (y={})",
                index,
                text.len(),
                cursor.y
            );
            return;
        }
    }
}

/// Emits spaces up to the next tab stop.
///
/// A tab that reaches the right edge ends the line and drops its remaining
/// columns.
fn expand_tab<S>(
    surface: &mut S,
    cursor: &mut LayoutCursor,
    clip: &ClipRect,
    font: &FontMetrics,
) -> bool
where
    S: GlyphSurface + ?Sized,
{
    let width = surface.glyph_width(' ');
    loop {
        if cursor.overflows(width, clip) {
            return cursor.line_break(clip, font);
        }

        surface.draw_glyph(' ', cursor.position());
        cursor.advance(width);
        cursor.step_column();
        if cursor.column == 0 {
            return true;
        }
    }
}

fn place_glyph<S>(
    surface: &mut S,
    cursor: &mut LayoutCursor,
    c: char,
    clip: &ClipRect,
    font: &FontMetrics,
) -> bool
where
    S: GlyphSurface + ?Sized,
{
    let width = surface.glyph_width(c);
    if cursor.overflows(width, clip) {
        if !cursor.line_break(clip, font) {
            return false;
        }
    } else {
        cursor.step_column();
    }

    surface.draw_glyph(c, cursor.position());
    cursor.advance(width);
    true
}
