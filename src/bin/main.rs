//! Host preview of the badge screen.
//!
//! Renders the caption given as the first argument (or the default caption)
//! exactly as the panel would show it and writes the frame to stdout as a
//! binary PBM.

use std::{env, io};

use badge_core::{
    caption::{CAPTION_MAX_BYTES, DEFAULT_CAPTION, load_caption},
    qr::{FixedVersionEncoder, QR_VERSION},
    scene::{SceneComposer, SceneConfig},
};
use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X9},
    pixelcolor::BinaryColor,
};
use gdeh0213b73::{FrameBuffer, Rotation};
use heapless::String as HeaplessString;
use log::{LevelFilter, info, warn};

use pbm::PbmPresenter;

#[path = "main/pbm.rs"]
mod pbm;

const ROTATION: Rotation = Rotation::Landscape;

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let source = env::args().nth(1);
    let mut caption: HeaplessString<CAPTION_MAX_BYTES> = HeaplessString::new();
    if !load_caption(source.as_deref().unwrap_or(DEFAULT_CAPTION), &mut caption) {
        warn!("caption truncated to {} bytes", caption.len());
    }

    let config = SceneConfig::default();
    let mut composer = SceneComposer::new(FixedVersionEncoder::default(), config);
    let mut frame = FrameBuffer::new(ROTATION);
    let style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
    let mut presenter = PbmPresenter::new(io::stdout().lock());

    info!(
        "rendering {} byte caption, qr version {}, {}x{} surface",
        caption.len(),
        QR_VERSION,
        frame.width(),
        frame.height()
    );
    composer.render(&caption, &mut frame, style, &mut presenter);
    info!("frame done: {} inked pixels", frame.ink_count());

    presenter.finish()
}
