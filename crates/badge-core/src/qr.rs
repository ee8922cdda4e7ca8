//! QR module grid collaborator.

use log::warn;
use qrcodegen_no_heap::{QrCode, QrCodeEcc, Version};

/// QR version used by the badge: 61x61 modules.
pub const QR_VERSION: u8 = 11;

/// Working buffer length for [`QR_VERSION`].
pub const QR_BUFFER_LEN: usize = module_buffer_len(QR_VERSION);

/// Bytes needed to hold the modules of `version`, plus the length byte.
pub const fn module_buffer_len(version: u8) -> usize {
    let side = version as usize * 4 + 17;
    (side * side).div_ceil(8) + 1
}

/// Square matrix of dark/light modules.
pub trait ModuleGrid {
    /// Side length in modules.
    fn size(&self) -> u32;
    /// `true` for a dark module; out-of-range coordinates are light.
    fn is_dark(&self, x: u32, y: u32) -> bool;
}

impl ModuleGrid for QrCode<'_> {
    fn size(&self) -> u32 {
        QrCode::size(self) as u32
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        self.get_module(x as i32, y as i32)
    }
}

/// Produces a module grid for a text, scoped to one closure call.
pub trait QrEncoder {
    /// Encodes `text` and hands the grid to `f`.
    ///
    /// Returns `None` when no grid could be produced.
    fn with_grid<R>(&mut self, text: &str, f: impl FnOnce(&dyn ModuleGrid) -> R) -> Option<R>;
}

/// Encoder pinned to one QR version, backed by fixed buffers.
pub struct FixedVersionEncoder {
    version: u8,
    ecc: QrCodeEcc,
    temp: [u8; QR_BUFFER_LEN],
    out: [u8; QR_BUFFER_LEN],
}

impl Default for FixedVersionEncoder {
    fn default() -> Self {
        Self::new(QR_VERSION, QrCodeEcc::Low)
    }
}

impl FixedVersionEncoder {
    /// Versions above [`QR_VERSION`] do not fit the buffers and always fail to encode.
    pub const fn new(version: u8, ecc: QrCodeEcc) -> Self {
        Self {
            version,
            ecc,
            temp: [0u8; QR_BUFFER_LEN],
            out: [0u8; QR_BUFFER_LEN],
        }
    }
}

impl QrEncoder for FixedVersionEncoder {
    fn with_grid<R>(&mut self, text: &str, f: impl FnOnce(&dyn ModuleGrid) -> R) -> Option<R> {
        if !(1..=QR_VERSION).contains(&self.version) {
            warn!(
                "qr: version {} exceeds buffer capacity (max {})",
                self.version, QR_VERSION
            );
            return None;
        }

        let version = Version::new(self.version);
        let encoded = QrCode::encode_text(
            text,
            &mut self.temp[..],
            &mut self.out[..],
            self.ecc,
            version,
            version,
            None,
            false,
        );
        match encoded {
            Ok(code) => Some(f(&code)),
            Err(err) => {
                warn!(
                    "qr: {} bytes do not fit version {}: {:?}",
                    text.len(),
                    self.version,
                    err
                );
                None
            }
        }
    }
}
