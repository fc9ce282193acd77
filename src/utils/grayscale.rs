//! RGB to grayscale conversion
//!
//! Y = 0.299*R + 0.587*G + 0.114*B, computed with fast integer arithmetic:
//! Y = (76*R + 150*G + 29*B) >> 8. Large frames are converted row-parallel
//! with rayon; the per-frame detection stages downstream stay single-threaded.

use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: i32 = 76;
const COEF_G: i32 = 150;
const COEF_B: i32 = 29;

/// Frames with at least this many pixels are converted in parallel
const PARALLEL_PIXEL_THRESHOLD: usize = 640 * 480;

/// Convert an RGB image (3 bytes per pixel) to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width * height >= PARALLEL_PIXEL_THRESHOLD {
        rgb_to_grayscale_parallel(rgb, width, height)
    } else {
        rgb_to_grayscale_scalar(rgb, width, height)
    }
}

fn rgb_to_grayscale_scalar(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];
    for (i, out) in gray.iter_mut().enumerate() {
        let idx = i * 3;
        let r = rgb[idx] as i32;
        let g = rgb[idx + 1] as i32;
        let b = rgb[idx + 2] as i32;
        let lum = (COEF_R * r + COEF_G * g + COEF_B * b) >> 8;
        *out = lum.min(255) as u8;
    }
    gray
}

/// Convert RGB to grayscale processing rows in parallel
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 3;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 3;
            let r = rgb[idx] as i32;
            let g = rgb[idx + 1] as i32;
            let b = rgb[idx + 2] as i32;
            let lum = (COEF_R * r + COEF_G * g + COEF_B * b) >> 8;
            *out = lum.min(255) as u8;
        }
    });

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale_extremes() {
        let white = vec![255, 255, 255];
        let gray = rgb_to_grayscale(&white, 1, 1);
        assert!(gray[0] >= 254);

        let black = vec![0, 0, 0];
        let gray = rgb_to_grayscale(&black, 1, 1);
        assert_eq!(gray[0], 0);

        let red = vec![255, 0, 0];
        let gray = rgb_to_grayscale(&red, 1, 1);
        assert!(gray[0] > 0 && gray[0] < 255);
    }

    #[test]
    fn test_scalar_matches_parallel() {
        let width = 64;
        let height = 16;
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();

        let scalar = rgb_to_grayscale_scalar(&rgb, width, height);
        let parallel = rgb_to_grayscale_parallel(&rgb, width, height);
        assert_eq!(scalar, parallel);
    }
}
