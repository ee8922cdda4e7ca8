use std::io::{self, Write};

use badge_core::scene::Present;
use gdeh0213b73::FrameBuffer;

/// Writes each presented frame as a binary PBM (`P4`) image.
pub(super) struct PbmPresenter<W: Write> {
    out: W,
    frames: usize,
}

impl<W: Write> PbmPresenter<W> {
    pub(super) fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Flushes the writer; errors if no frame made it out.
    pub(super) fn finish(mut self) -> io::Result<()> {
        self.out.flush()?;
        if self.frames == 0 {
            return Err(io::Error::other("no frame was presented"));
        }
        Ok(())
    }
}

impl<W: Write> Present<FrameBuffer> for PbmPresenter<W> {
    type Error = io::Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        let width = frame.width();
        let height = frame.height();
        write!(self.out, "P4\n{width} {height}\n")?;

        // PBM rows are logical rows, padded to whole bytes; 1 is black.
        let mut row = vec![0u8; width.div_ceil(8)];
        for y in 0..height {
            row.fill(0);
            for x in 0..width {
                if frame.pixel(x, y) == Some(true) {
                    row[x / 8] |= 1u8 << (7 - (x % 8));
                }
            }
            self.out.write_all(&row)?;
        }

        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gdeh0213b73::Rotation;

    use super::*;

    #[test]
    fn frame_is_written_as_p4() {
        let mut frame = FrameBuffer::new(Rotation::Landscape);
        frame.set_pixel(0, 0, true);
        frame.set_pixel(9, 1, true);

        let mut presenter = PbmPresenter::new(Vec::new());
        presenter.present(&frame).unwrap();

        let header = b"P4\n250 122\n";
        let out = &presenter.out;
        assert_eq!(&out[..header.len()], header);
        assert_eq!(out.len(), header.len() + 32 * 122);

        let pixels = &out[header.len()..];
        assert_eq!(pixels[0], 0b1000_0000);
        assert_eq!(pixels[32 + 1], 0b0100_0000);
        assert_eq!(presenter.frames, 1);
    }

    #[test]
    fn finish_without_frame_is_an_error() {
        let presenter = PbmPresenter::new(Vec::new());

        assert!(presenter.finish().is_err());
    }
}
