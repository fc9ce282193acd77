use image::DynamicImage;

use crate::error::{DetectError, Result};
use crate::utils::grayscale::rgb_to_grayscale;

/// Row-major 8-bit grayscale pixel buffer, the engine's working image.
///
/// Owns its pixel data exclusively; every downstream structure (contours,
/// quad candidates, rectified patches) is derived per frame and holds no
/// reference back into the buffer. Invariant: `pixels.len() == width * height`
/// from construction to drop.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a zeroed buffer with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize],
        }
    }

    /// Wrap an existing grayscale byte vector
    ///
    /// Fails with `InvalidImageFormat` if the length does not match the
    /// dimensions.
    pub fn from_gray(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(DetectError::InvalidImageFormat {
                reason: format!(
                    "pixel buffer length {} does not match {}x{}",
                    pixels.len(),
                    width,
                    height
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert a platform image into a grayscale buffer.
    ///
    /// `flip` reverses column order, `vert_flip` reverses row order; both are
    /// applied during the copy so no second pass over the pixels is needed.
    pub fn render_from_image(source: &DynamicImage, flip: bool, vert_flip: bool) -> Result<Self> {
        let rgb = source.to_rgb8();
        let (width, height) = (rgb.width(), rgb.height());
        if width == 0 || height == 0 {
            return Err(DetectError::InvalidImageFormat {
                reason: format!("source image has empty dimensions {}x{}", width, height),
            });
        }

        let gray = rgb_to_grayscale(rgb.as_raw(), width as usize, height as usize);

        let w = width as usize;
        let h = height as usize;
        let mut pixels = vec![0u8; w * h];
        for y in 0..h {
            let src_y = if vert_flip { h - 1 - y } else { y };
            let src_row = &gray[src_y * w..(src_y + 1) * w];
            let dst_row = &mut pixels[y * w..(y + 1) * w];
            if flip {
                for (dst, src) in dst_row.iter_mut().zip(src_row.iter().rev()) {
                    *dst = *src;
                }
            } else {
                dst_row.copy_from_slice(src_row);
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Buffer width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count
    pub fn total_size(&self) -> usize {
        self.pixels.len()
    }

    /// Bounds-checked pixel read
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<u8> {
        self.check_bounds(x, y)?;
        Ok(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Bounds-checked pixel write
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        self.check_bounds(x, y)?;
        self.pixels[y as usize * self.width as usize + x as usize] = value;
        Ok(())
    }

    /// Unchecked pixel read for the stage hot loops; callers guarantee the
    /// coordinates are in range
    #[inline]
    pub(crate) fn pixel_at(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width as usize + x]
    }

    /// Raw pixel data, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable raw pixel data, row-major
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(DetectError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
