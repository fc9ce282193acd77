//! Histogram contrast stretching
//!
//! Captured frames arrive with uneven lighting; stretching the observed
//! intensity range to the full 0..=255 span makes the fixed midpoint
//! threshold used by contour tracing usable across frames.

use crate::models::RasterBuffer;

/// Linearly rescale the buffer so its darkest pixel maps to 0 and its
/// brightest to 255, in place.
///
/// A constant buffer is left unchanged. Idempotent: once the range spans
/// 0..=255 the mapping is the identity.
pub fn stretch_contrast(buffer: &mut RasterBuffer) {
    let pixels = buffer.as_bytes_mut();
    if pixels.is_empty() {
        return;
    }

    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for &p in pixels.iter() {
        min = min.min(p);
        max = max.max(p);
    }
    if min == max {
        return;
    }

    let range = (max - min) as u32;
    // Precomputed 256-entry map beats a divide per pixel
    let mut lut = [0u8; 256];
    for (v, entry) in lut.iter_mut().enumerate().take(max as usize + 1).skip(min as usize) {
        *entry = (((v as u32 - min as u32) * 255 + range / 2) / range) as u8;
    }

    for p in pixels.iter_mut() {
        *p = lut[*p as usize];
    }
}
