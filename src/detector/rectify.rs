//! Perspective rectification of a quad candidate onto a square sampling grid

use crate::config::DetectorConfig;
use crate::detector::quad::QuadCandidate;
use crate::error::{DetectError, Result};
use crate::models::{Point, RasterBuffer};
use crate::utils::geometry::PerspectiveTransform;

/// Fixed-size square grid of intensity samples cut out of the source buffer
/// along a quad candidate's boundary
#[derive(Debug, Clone)]
pub struct RectifiedPatch {
    side: usize,
    samples: Vec<u8>,
}

impl RectifiedPatch {
    /// Side length in samples
    pub fn side(&self) -> usize {
        self.side
    }

    /// Sample at (x, y); callers stay within `side`
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        self.samples[y * self.side + x]
    }

    /// Build a synthetic patch from a cell grid (true = dark cell), for
    /// decoder tests and benches
    pub fn from_cells(cells: &[bool], config: &DetectorConfig) -> Self {
        let total = config.total_cells();
        assert_eq!(cells.len(), total * total, "cell grid size mismatch");
        let spc = config.samples_per_cell;
        let side = config.patch_side();
        let mut samples = vec![255u8; side * side];
        for cy in 0..total {
            for cx in 0..total {
                if !cells[cy * total + cx] {
                    continue;
                }
                for sy in 0..spc {
                    for sx in 0..spc {
                        samples[(cy * spc + sy) * side + cx * spc + sx] = 0;
                    }
                }
            }
        }
        Self { side, samples }
    }
}

/// Map the quad's interior onto a `patch_side x patch_side` grid.
///
/// The homography is built from patch coordinates to source coordinates, so
/// each destination sample needs exactly one forward application (inverse
/// mapping). Samples are interpolated bilinearly; samples falling outside
/// the source buffer read as background 0.
///
/// Fails with [`DetectError::DegenerateTransform`] when the corner
/// configuration is numerically near-collinear; the pipeline treats that as
/// a per-candidate failure and falls back to the next ranked quad.
pub fn rectify(
    buffer: &RasterBuffer,
    quad: &QuadCandidate,
    config: &DetectorConfig,
) -> Result<RectifiedPatch> {
    let side = config.patch_side();
    let s = side as f32;
    // Patch corners in the same canonical order the quad finder established:
    // clockwise from the corner nearest the origin
    let patch_corners = [
        Point::new(0.0, 0.0),
        Point::new(s, 0.0),
        Point::new(s, s),
        Point::new(0.0, s),
    ];

    let transform = PerspectiveTransform::from_quad(&patch_corners, &quad.corners)
        .ok_or(DetectError::DegenerateTransform)?;

    let mut samples = vec![0u8; side * side];
    for y in 0..side {
        for x in 0..side {
            // Sample at the pixel center of the destination grid
            let src = transform.apply(&Point::new(x as f32 + 0.5, y as f32 + 0.5));
            samples[y * side + x] = bilinear_sample(buffer, src.x, src.y);
        }
    }

    Ok(RectifiedPatch { side, samples })
}

/// Bilinear interpolation; coordinates outside the buffer contribute 0
fn bilinear_sample(buffer: &RasterBuffer, x: f32, y: f32) -> u8 {
    let width = buffer.width() as i32;
    let height = buffer.height() as i32;

    let x0 = (x - 0.5).floor();
    let y0 = (y - 0.5).floor();
    let fx = (x - 0.5) - x0;
    let fy = (y - 0.5) - y0;
    let x0 = x0 as i32;
    let y0 = y0 as i32;

    let fetch = |px: i32, py: i32| -> f32 {
        if px < 0 || py < 0 || px >= width || py >= height {
            0.0
        } else {
            buffer.pixel_at(px as usize, py as usize) as f32
        }
    };

    let top = fetch(x0, y0) * (1.0 - fx) + fetch(x0 + 1, y0) * fx;
    let bottom = fetch(x0, y0 + 1) * (1.0 - fx) + fetch(x0 + 1, y0 + 1) * fx;
    let value = top * (1.0 - fy) + bottom * fy;
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(corners: [Point; 4]) -> QuadCandidate {
        QuadCandidate {
            corners,
            area: 0.0,
            score: 0.0,
        }
    }

    #[test]
    fn test_axis_aligned_rectify() {
        // Dark 40x40 square at (10,10) in a white frame
        let mut gray = vec![255u8; 100 * 100];
        for y in 10..50 {
            for x in 10..50 {
                gray[y * 100 + x] = 0;
            }
        }
        let buf = RasterBuffer::from_gray(gray, 100, 100).unwrap();

        let config = DetectorConfig::default();
        let q = quad([
            Point::new(10.0, 10.0),
            Point::new(49.0, 10.0),
            Point::new(49.0, 49.0),
            Point::new(10.0, 49.0),
        ]);

        let patch = rectify(&buf, &q, &config).unwrap();
        assert_eq!(patch.side(), config.patch_side());

        // Interior of the patch maps inside the dark square
        let mid = patch.side() / 2;
        assert!(patch.sample(mid, mid) < 10);
        assert!(patch.sample(4, 4) < 10);
    }

    #[test]
    fn test_degenerate_quad_rejected() {
        let buf = RasterBuffer::new(50, 50);
        let config = DetectorConfig::default();
        let q = quad([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        ]);

        let err = rectify(&buf, &q, &config).unwrap_err();
        assert_eq!(err, DetectError::DegenerateTransform);
    }

    #[test]
    fn test_out_of_bounds_samples_are_background() {
        // Quad hanging off the left edge of a bright buffer
        let buf = RasterBuffer::from_gray(vec![200u8; 30 * 30], 30, 30).unwrap();
        let config = DetectorConfig::default();
        let q = quad([
            Point::new(-20.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 20.0),
            Point::new(-20.0, 20.0),
        ]);

        let patch = rectify(&buf, &q, &config).unwrap();
        // Left half of the patch falls outside the source
        assert_eq!(patch.sample(2, patch.side() / 2), 0);
        assert!(patch.sample(patch.side() - 3, patch.side() / 2) > 150);
    }

    #[test]
    fn test_from_cells_paints_dark_cells() {
        let config = DetectorConfig::default();
        let total = config.total_cells();
        let mut cells = vec![false; total * total];
        cells[0] = true; // top-left border cell

        let patch = RectifiedPatch::from_cells(&cells, &config);
        assert_eq!(patch.sample(0, 0), 0);
        assert_eq!(patch.sample(config.samples_per_cell, 0), 255);
    }
}
