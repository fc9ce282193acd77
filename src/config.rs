//! Detector tuning parameters
//!
//! Every knob that affects detection sensitivity is an explicit field here
//! rather than a constant buried in a stage, so tests can tighten or relax
//! individual stages independently.

/// Contrast pre-processing applied before contour tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContrastMode {
    /// Linear min/max histogram stretch to the full 0..=255 range
    #[default]
    Stretch,
    /// Leave intensities untouched (synthetic input already spans the range)
    None,
}

/// Configuration for one detection pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Data bit cells per marker side (excluding the border)
    pub grid_cells: usize,
    /// Quiet border cells inside the quad on each side
    pub border_cells: usize,
    /// Rectified samples per cell side; cell mean is taken over
    /// `samples_per_cell^2` pixels
    pub samples_per_cell: usize,
    /// Contours with fewer boundary points than this are discarded as noise
    pub min_contour_perimeter: usize,
    /// Minimum quad area in square pixels
    pub min_quad_area: f32,
    /// Maximum deviation of each internal angle from 90 degrees
    pub angle_tolerance_deg: f32,
    /// Contrast pre-processing mode
    pub contrast: ContrastMode,
}

impl DetectorConfig {
    /// Total cells per side, border included
    pub fn total_cells(&self) -> usize {
        self.grid_cells + 2 * self.border_cells
    }

    /// Side length of the rectified patch in samples
    pub fn patch_side(&self) -> usize {
        self.total_cells() * self.samples_per_cell
    }

    /// Number of payload bytes carried by the marker, checksum excluded
    pub fn payload_len(&self) -> usize {
        ((self.grid_cells * self.grid_cells) / 8).saturating_sub(1)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            grid_cells: 8,
            border_cells: 1,
            samples_per_cell: 8,
            min_contour_perimeter: 40,
            min_quad_area: 100.0,
            angle_tolerance_deg: 40.0,
            contrast: ContrastMode::Stretch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let cfg = DetectorConfig::default();
        assert_eq!(cfg.total_cells(), 10);
        assert_eq!(cfg.patch_side(), 80);
        // 64 bits -> 8 bytes, last one is the checksum
        assert_eq!(cfg.payload_len(), 7);
    }
}
