#![cfg_attr(not(test), no_std)]

//! GDEH0213B73 (2.13" 250x122 e-paper) framebuffer primitives.
//!
//! The buffer mirrors the controller RAM so a panel driver can stream
//! [`FrameBuffer::bytes`] without reshuffling.

mod framebuffer;
pub mod geometry;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::FrameBuffer;
pub use geometry::Rotation;
