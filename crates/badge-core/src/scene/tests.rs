use core::convert::Infallible;

use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X9};
use gdeh0213b73::{FrameBuffer, Rotation};

use super::*;
use crate::qr::FixedVersionEncoder;

struct FakeGrid {
    size: u32,
    dark: fn(u32, u32) -> bool,
}

impl ModuleGrid for FakeGrid {
    fn size(&self) -> u32 {
        self.size
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        x < self.size && y < self.size && (self.dark)(x, y)
    }
}

struct ScriptedEncoder {
    grid: Option<FakeGrid>,
    calls: usize,
}

impl ScriptedEncoder {
    fn solid(size: u32) -> Self {
        Self {
            grid: Some(FakeGrid {
                size,
                dark: |_, _| true,
            }),
            calls: 0,
        }
    }

    fn failing() -> Self {
        Self {
            grid: None,
            calls: 0,
        }
    }
}

impl QrEncoder for ScriptedEncoder {
    fn with_grid<R>(&mut self, _text: &str, f: impl FnOnce(&dyn ModuleGrid) -> R) -> Option<R> {
        self.calls += 1;
        self.grid.as_ref().map(|grid| f(grid))
    }
}

#[derive(Default)]
struct CountingPresenter {
    frames: usize,
    last_ink: usize,
}

impl Present<FrameBuffer> for CountingPresenter {
    type Error = Infallible;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.frames += 1;
        self.last_ink = frame.ink_count();
        Ok(())
    }
}

struct BrokenPresenter {
    attempts: usize,
}

impl Present<FrameBuffer> for BrokenPresenter {
    type Error = &'static str;

    fn present(&mut self, _frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.attempts += 1;
        Err("busy timeout")
    }
}

fn style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X9, BinaryColor::On)
}

fn inked_frame() -> FrameBuffer {
    let mut frame = FrameBuffer::new(Rotation::Landscape);
    frame.clear(true);
    frame
}

fn ink_in(frame: &FrameBuffer, xs: core::ops::Range<usize>, ys: core::ops::Range<usize>) -> usize {
    let mut count = 0;
    for y in ys {
        for x in xs.clone() {
            if frame.pixel(x, y) == Some(true) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn empty_caption_clears_and_presents_blank_frame() {
    let mut composer = SceneComposer::new(ScriptedEncoder::solid(3), SceneConfig::default());
    let mut frame = inked_frame();
    let mut presenter = CountingPresenter::default();

    composer.render("", &mut frame, style(), &mut presenter);

    assert_eq!(frame.ink_count(), 0);
    assert_eq!(composer.encoder.calls, 0);
    assert_eq!(presenter.frames, 1);
    assert_eq!(presenter.last_ink, 0);
}

#[test]
fn encoder_failure_leaves_frame_blank() {
    let mut composer = SceneComposer::new(ScriptedEncoder::failing(), SceneConfig::default());
    let mut frame = inked_frame();
    let mut presenter = CountingPresenter::default();

    composer.render("HELLO", &mut frame, style(), &mut presenter);

    assert_eq!(composer.encoder.calls, 1);
    assert_eq!(frame.ink_count(), 0);
    assert_eq!(presenter.frames, 1);
}

#[test]
fn modules_are_painted_as_scaled_blocks() {
    let mut composer = SceneComposer::new(ScriptedEncoder::solid(3), SceneConfig::default());
    let mut frame = FrameBuffer::new(Rotation::Landscape);
    let mut presenter = CountingPresenter::default();

    composer.render("H", &mut frame, style(), &mut presenter);

    // 3x3 modules at 2px from (0, 6).
    assert_eq!(ink_in(&frame, 0..6, 6..12), 36);
    assert_eq!(ink_in(&frame, 0..10, 0..6), 0);
    assert_eq!(ink_in(&frame, 0..10, 12..122), 0);
    // Gap between block and caption.
    assert_eq!(ink_in(&frame, 6..10, 0..122), 0);
    // Caption starts at x = 6 + 4, y = 6.
    assert!(ink_in(&frame, 10..16, 6..15) > 0);
    assert_eq!(presenter.last_ink, frame.ink_count());
}

#[test]
fn module_pattern_follows_grid() {
    let encoder = ScriptedEncoder {
        grid: Some(FakeGrid {
            size: 2,
            dark: |x, y| x == y,
        }),
        calls: 0,
    };
    let config = SceneConfig {
        qr_origin: Point::new(20, 20),
        module_size: 3,
        ..SceneConfig::default()
    };
    let mut composer = SceneComposer::new(encoder, config);
    let mut frame = FrameBuffer::new(Rotation::Landscape);

    composer.render("\n", &mut frame, style(), &mut CountingPresenter::default());

    assert_eq!(ink_in(&frame, 20..23, 20..23), 9);
    assert_eq!(ink_in(&frame, 23..26, 23..26), 9);
    assert_eq!(ink_in(&frame, 23..26, 20..23), 0);
    assert_eq!(frame.ink_count(), 18);
}

#[test]
fn long_caption_is_truncated_at_bottom_edge() {
    let mut composer = SceneComposer::new(ScriptedEncoder::solid(61), SceneConfig::default());
    let mut frame = FrameBuffer::new(Rotation::Landscape);
    let caption = "x".repeat(400);

    composer.render(&caption, &mut frame, style(), &mut CountingPresenter::default());

    // Caption column starts at 126; lines every 11px from y=6, last fitting line at y=105.
    assert!(ink_in(&frame, 126..250, 105..114) > 0);
    assert_eq!(ink_in(&frame, 126..250, 115..122), 0);
    // Wraps before the right edge.
    assert_eq!(ink_in(&frame, 246..250, 0..122), 0);
}

#[test]
fn present_failure_is_absorbed() {
    let mut composer = SceneComposer::new(ScriptedEncoder::solid(3), SceneConfig::default());
    let mut frame = FrameBuffer::new(Rotation::Landscape);
    let mut presenter = BrokenPresenter { attempts: 0 };

    composer.render("HI", &mut frame, style(), &mut presenter);

    assert_eq!(presenter.attempts, 1);
    assert!(frame.ink_count() > 36);
}

#[test]
fn each_pass_overwrites_previous_frame() {
    let mut composer = SceneComposer::new(ScriptedEncoder::solid(3), SceneConfig::default());
    let mut frame = FrameBuffer::new(Rotation::Landscape);
    let mut presenter = CountingPresenter::default();

    composer.render("HELLO", &mut frame, style(), &mut presenter);
    assert!(frame.ink_count() > 0);

    composer.render("", &mut frame, style(), &mut presenter);
    assert_eq!(frame.ink_count(), 0);
    assert_eq!(presenter.frames, 2);
}

#[test]
fn real_encoder_draws_qr_and_caption() {
    let mut composer = SceneComposer::new(FixedVersionEncoder::default(), SceneConfig::default());
    let mut frame = FrameBuffer::new(Rotation::Landscape);
    let mut presenter = CountingPresenter::default();

    composer.render("HELLO", &mut frame, style(), &mut presenter);

    // Finder pattern corner module.
    assert_eq!(frame.pixel(0, 6), Some(true));
    assert_eq!(frame.pixel(1, 7), Some(true));
    assert!(ink_in(&frame, 126..160, 6..15) > 0);
    assert_eq!(ink_in(&frame, 122..126, 0..122), 0);
}

#[test]
fn caption_origin_sits_right_of_block() {
    let config = SceneConfig::default();

    assert_eq!(config.caption_origin(61), Point::new(126, 6));
    assert_eq!(config.caption_origin(21), Point::new(46, 6));
}

#[test]
fn leading_nul_reads_as_empty_caption() {
    let mut composer = SceneComposer::new(ScriptedEncoder::solid(3), SceneConfig::default());
    let mut frame = inked_frame();
    let mut presenter = CountingPresenter::default();

    composer.render("\0HELLO", &mut frame, style(), &mut presenter);

    assert_eq!(composer.encoder.calls, 0);
    assert_eq!(frame.ink_count(), 0);
    assert_eq!(presenter.frames, 1);
}

#[test]
fn text_after_nul_reaches_neither_qr_nor_caption() {
    let mut composer = SceneComposer::new(FixedVersionEncoder::default(), SceneConfig::default());
    let mut cut = FrameBuffer::new(Rotation::Landscape);
    let mut plain = FrameBuffer::new(Rotation::Landscape);

    composer.render("AB\0CD", &mut cut, style(), &mut CountingPresenter::default());
    composer.render("AB", &mut plain, style(), &mut CountingPresenter::default());

    assert!(plain.ink_count() > 0);
    assert!(cut.bytes() == plain.bytes());
}
