//! Caption storage policy.

use heapless::String;

/// Largest caption the badge stores.
///
/// The stored parameter is 321 bytes including its NUL terminator, which is
/// also the byte capacity of a version 11 QR code at low error correction.
pub const CAPTION_MAX_BYTES: usize = 320;

/// Caption shown when nothing has been configured.
pub const DEFAULT_CAPTION: &str = "Your ad could be\there!";

/// Copies whole characters of `source` into `out` until it is full.
///
/// Returns `false` when `source` had to be cut short.
pub fn load_caption<const N: usize>(source: &str, out: &mut String<N>) -> bool {
    out.clear();

    for ch in source.chars() {
        if out.push(ch).is_err() {
            return false;
        }
    }

    true
}
