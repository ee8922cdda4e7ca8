//! Full-screen badge composition: QR block on the left, caption flowing to its right.

use core::fmt::Debug;

use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Primitive, Size},
    primitives::{PrimitiveStyle, Rectangle},
    text::renderer::TextRenderer,
};
use log::{debug, warn};

use crate::{
    layout::{ClipRect, FontMetrics, StyledSurface, flow},
    qr::{ModuleGrid, QrEncoder},
};

#[cfg(test)]
mod tests;

/// Pushes a finished frame to the physical output.
pub trait Present<F: ?Sized> {
    type Error: Debug;

    fn present(&mut self, frame: &F) -> Result<(), Self::Error>;
}

/// Placement of the QR block and the caption.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SceneConfig {
    /// Top-left corner of the QR block.
    pub qr_origin: Point,
    /// Edge length in pixels of one QR module.
    pub module_size: u32,
    /// Offset of the caption from the QR block's top-right corner.
    pub caption_gap: Point,
    pub font: FontMetrics,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            qr_origin: Point::new(0, 6),
            module_size: 2,
            caption_gap: Point::new(4, 0),
            font: FontMetrics::default(),
        }
    }
}

impl SceneConfig {
    /// Caption origin next to a QR block of `grid_size` modules.
    pub fn caption_origin(&self, grid_size: u32) -> Point {
        let block = (grid_size * self.module_size) as i32;
        Point::new(
            self.qr_origin.x + block + self.caption_gap.x,
            self.qr_origin.y + self.caption_gap.y,
        )
    }
}

/// Draws complete badge frames.
///
/// `render` takes `&mut self`, so a pass always finishes before the next starts.
pub struct SceneComposer<E> {
    encoder: E,
    config: SceneConfig,
}

impl<E> SceneComposer<E>
where
    E: QrEncoder,
{
    pub const fn new(encoder: E, config: SceneConfig) -> Self {
        Self { encoder, config }
    }

    /// Clears `target`, draws the QR code for `caption` and the caption itself,
    /// then presents the frame.
    ///
    /// `caption` ends at its first NUL. An empty caption or a failed encode
    /// leaves the frame blank. Nothing is reported to the caller; failures
    /// are logged.
    pub fn render<D, S, P>(&mut self, caption: &str, target: &mut D, style: S, presenter: &mut P)
    where
        D: DrawTarget<Color = BinaryColor> + OriginDimensions,
        S: TextRenderer<Color = BinaryColor> + Clone,
        P: Present<D>,
    {
        let caption = caption.split('\0').next().unwrap_or("");
        let _ = target.clear(BinaryColor::Off);

        if caption.is_empty() {
            debug!("scene: empty caption, blank frame");
        } else {
            let config = self.config;
            let grid_size = self.encoder.with_grid(caption, |grid| {
                paint_modules(target, grid, &config);
                grid.size()
            });

            match grid_size {
                Some(grid_size) => {
                    let size = target.size();
                    let clip = ClipRect::new(
                        config.caption_origin(grid_size),
                        Point::new(size.width as i32, size.height as i32),
                    );
                    let mut surface = StyledSurface::new(target, style, &config.font);
                    flow(&mut surface, caption, clip, config.font);
                }
                None => warn!("scene: no module grid, frame left blank"),
            }
        }

        if let Err(err) = presenter.present(target) {
            warn!("scene: present failed: {:?}", err);
        }
    }
}

fn paint_modules<D>(target: &mut D, grid: &dyn ModuleGrid, config: &SceneConfig)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);
    let block = Size::new(config.module_size, config.module_size);
    let step = config.module_size as i32;

    for y in 0..grid.size() {
        for x in 0..grid.size() {
            if grid.is_dark(x, y) {
                let origin = config.qr_origin + Point::new(x as i32 * step, y as i32 * step);
                let _ = Rectangle::new(origin, block).into_styled(fill).draw(target);
            }
        }
    }
}
