//! In-memory framebuffer for GDEH0213B73.

use core::convert::TryFrom;

use crate::geometry::{BUFFER_SIZE, HEIGHT, LINE_BYTES, Rotation};

/// 1bpp framebuffer laid out like the controller RAM.
///
/// Bit mapping within one row byte: bit 7 is the first pixel in that byte.
/// A set bit is paper (white), a clear bit is ink (black); `on` always means ink.
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
    rotation: Rotation,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(Rotation::default())
    }
}

impl FrameBuffer {
    /// Creates a new white framebuffer.
    pub const fn new(rotation: Rotation) -> Self {
        Self {
            bytes: [0xFFu8; BUFFER_SIZE],
            rotation,
        }
    }

    /// Changes the logical orientation. Existing pixels are not moved.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Logical width for the current rotation.
    pub fn width(&self) -> usize {
        self.rotation.logical_size().0
    }

    /// Logical height for the current rotation.
    pub fn height(&self) -> usize {
        self.rotation.logical_size().1
    }

    /// Returns the underlying RAM image.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Clears framebuffer to white (`on = false`) or black (`on = true`).
    pub fn clear(&mut self, on: bool) {
        self.bytes.fill(if on { 0x00 } else { 0xFF });
    }

    /// Sets a logical pixel to ink (`on = true`) or paper.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        let Some((ram_x, ram_y)) = self.rotation.to_ram(x, y) else {
            return false;
        };

        let byte_index = ram_y * LINE_BYTES + (ram_x / 8);
        let bit_mask = 1u8 << (7 - (ram_x % 8));

        if on {
            self.bytes[byte_index] &= !bit_mask;
        } else {
            self.bytes[byte_index] |= bit_mask;
        }

        true
    }

    /// Reads a logical pixel; `Some(true)` is ink.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        let (ram_x, ram_y) = self.rotation.to_ram(x, y)?;

        let byte_index = ram_y * LINE_BYTES + (ram_x / 8);
        let bit_mask = 1u8 << (7 - (ram_x % 8));
        Some((self.bytes[byte_index] & bit_mask) == 0)
    }

    /// Returns one RAM row (0-based, not rotated).
    pub fn row(&self, ram_y: usize) -> Option<&[u8; LINE_BYTES]> {
        if ram_y >= HEIGHT {
            return None;
        }

        let start = ram_y * LINE_BYTES;
        let end = start + LINE_BYTES;
        <&[u8; LINE_BYTES]>::try_from(&self.bytes[start..end]).ok()
    }

    /// Counts inked pixels in the logical extent.
    pub fn ink_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.pixel(x, y) == Some(true) {
                    count += 1;
                }
            }
        }
        count
    }
}
