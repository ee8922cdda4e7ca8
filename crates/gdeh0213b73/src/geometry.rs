//! Controller RAM geometry and rotation mapping for the GDEH0213B73 panel.

/// Controller RAM row width in pixels (only [`VISIBLE_WIDTH`] columns are glass).
pub const RAM_WIDTH: usize = 128;
/// Columns actually visible on the panel.
pub const VISIBLE_WIDTH: usize = 122;
/// Panel height in pixels (RAM rows).
pub const HEIGHT: usize = 250;
/// Number of bytes in one RAM row.
pub const LINE_BYTES: usize = RAM_WIDTH / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;

/// Logical orientation of the drawing surface.
///
/// The variants follow the usual GFX rotation numbering 0..=3.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rotation {
    #[default]
    Portrait,
    Landscape,
    PortraitFlipped,
    LandscapeFlipped,
}

impl Rotation {
    /// Logical `(width, height)` seen by drawing code.
    pub const fn logical_size(self) -> (usize, usize) {
        match self {
            Self::Portrait | Self::PortraitFlipped => (VISIBLE_WIDTH, HEIGHT),
            Self::Landscape | Self::LandscapeFlipped => (HEIGHT, VISIBLE_WIDTH),
        }
    }

    /// Maps a logical pixel to its RAM `(x, y)`.
    ///
    /// Returns `None` outside the logical extent.
    #[inline]
    pub fn to_ram(self, x: usize, y: usize) -> Option<(usize, usize)> {
        let (width, height) = self.logical_size();
        if x >= width || y >= height {
            return None;
        }

        Some(match self {
            Self::Portrait => (x, y),
            Self::Landscape => (VISIBLE_WIDTH - y - 1, x),
            Self::PortraitFlipped => (VISIBLE_WIDTH - x - 1, HEIGHT - y - 1),
            Self::LandscapeFlipped => (y, HEIGHT - x - 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_sized_for_ram_rows() {
        assert_eq!(LINE_BYTES, 16);
        assert_eq!(BUFFER_SIZE, 4_000);
    }

    #[test]
    fn landscape_swaps_axes() {
        assert_eq!(Rotation::Landscape.logical_size(), (250, 122));
        assert_eq!(Rotation::Landscape.to_ram(0, 0), Some((121, 0)));
        assert_eq!(Rotation::Landscape.to_ram(249, 121), Some((0, 249)));
    }

    #[test]
    fn corners_stay_inside_visible_columns() {
        for rotation in [
            Rotation::Portrait,
            Rotation::Landscape,
            Rotation::PortraitFlipped,
            Rotation::LandscapeFlipped,
        ] {
            let (w, h) = rotation.logical_size();
            for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
                let (rx, ry) = rotation.to_ram(x, y).unwrap();
                assert!(rx < VISIBLE_WIDTH, "{rotation:?} ({x},{y}) -> {rx}");
                assert!(ry < HEIGHT);
            }
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(Rotation::Landscape.to_ram(250, 0), None);
        assert_eq!(Rotation::Portrait.to_ram(122, 0), None);
    }
}
