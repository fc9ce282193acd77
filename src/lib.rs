//! qyoo_detect - Qyoo fiducial marker scanning library
//!
//! A pure Rust library that locates a printed Qyoo marker in a captured
//! frame and decodes its payload. Detection runs a strictly linear pipeline
//! per frame: grayscale ingestion, contrast stretching, contour tracing,
//! quad finding, perspective rectification, bit sampling with checksum
//! verification.
//!
//! "No marker in this frame" and "checksum failed" are routine outcomes for
//! live scanning and are reported through [`DetectionResult`] flags; the
//! error channel is reserved for bad input and caller bugs.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detector tuning parameters
pub mod config;
/// Payload decoding (bit sampling, checksum)
pub mod decoder;
/// Geometric detection stages (contours, quads, rectification)
pub mod detector;
/// Error taxonomy
pub mod error;
/// Core data structures (RasterBuffer, Point, DetectionResult)
pub mod models;
/// Per-frame pipeline orchestration
pub mod pipeline;
/// Pixel-level helpers (grayscale, contrast, geometry)
pub mod utils;

pub use config::{ContrastMode, DetectorConfig};
pub use error::{DetectError, Result};
pub use models::{DetectionResult, Outcome, Point, PointI, RasterBuffer};
pub use pipeline::{DetectionPipeline, Stage};

use image::DynamicImage;

/// Detect a Qyoo marker in a platform image with default tuning.
///
/// `flip` reverses column order and `vert_flip` reverses row order during
/// ingestion, matching camera feeds that deliver mirrored frames.
pub fn detect(source: &DynamicImage, flip: bool, vert_flip: bool) -> Result<DetectionResult> {
    DetectionPipeline::new().detect_image(source, flip, vert_flip)
}

/// Detect a Qyoo marker in a pre-computed grayscale buffer
///
/// # Arguments
/// * `gray` - Grayscale bytes (1 byte per pixel, row-major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn detect_from_grayscale(gray: &[u8], width: u32, height: u32) -> Result<DetectionResult> {
    let buffer = RasterBuffer::from_gray(gray.to_vec(), width, height)?;
    Ok(DetectionPipeline::new().detect(buffer))
}

/// Detector with configuration options
///
/// Wraps a [`DetectionPipeline`] for callers that scan many frames with the
/// same tuning.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    pipeline: DetectionPipeline,
}

impl Detector {
    /// Create a detector with default settings
    pub fn new() -> Self {
        Self {
            pipeline: DetectionPipeline::new(),
        }
    }

    /// Create a detector with explicit tuning
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            pipeline: DetectionPipeline::with_config(config),
        }
    }

    /// Detect a marker in a platform image
    pub fn detect_image(
        &mut self,
        source: &DynamicImage,
        flip: bool,
        vert_flip: bool,
    ) -> Result<DetectionResult> {
        self.pipeline.detect_image(source, flip, vert_flip)
    }

    /// Detect a marker in an owned grayscale buffer
    pub fn detect(&mut self, buffer: RasterBuffer) -> DetectionResult {
        self.pipeline.detect(buffer)
    }
}
