//! Per-frame detection pipeline
//!
//! Runs the stages in strict order: contrast, contour tracing, quad
//! finding, rectification, payload decode. Each stage's output becoming
//! available is a state transition; an empty stage output short-circuits to
//! NotFound. The pipeline holds no state between frames beyond its
//! configuration, so independent frames may run on independent instances
//! in parallel.

use image::DynamicImage;
use log::debug;

use crate::config::{ContrastMode, DetectorConfig};
use crate::decoder::decode_payload;
use crate::detector::contour::trace_contours;
use crate::detector::quad::find_quads;
use crate::detector::rectify::rectify;
use crate::error::{DetectError, Result};
use crate::models::{DetectionResult, RasterBuffer};
use crate::utils::contrast::stretch_contrast;

/// Pipeline stage; advanced linearly, logged per transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No frame loaded yet
    Idle,
    /// Grayscale buffer ingested
    BufferLoaded,
    /// Contrast pre-processing applied
    Enhanced,
    /// Contours traced
    ContoursTraced,
    /// Quad candidates ranked, best selected
    QuadSelected,
    /// Best candidate rectified onto the sampling grid
    Rectified,
    /// Payload sampled and checksum verified (or not)
    Decoded,
}

/// One-frame detection pipeline.
///
/// Each `detect` call starts from `Idle` regardless of the previous frame's
/// outcome; there is no hidden cross-call state.
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    config: DetectorConfig,
    stage: Stage,
}

impl DetectionPipeline {
    /// Create a pipeline with default tuning
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a pipeline with explicit tuning
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            config,
            stage: Stage::Idle,
        }
    }

    /// The tuning parameters this pipeline runs with
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Stage reached by the most recent `detect` call
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Drop any record of the previous frame
    pub fn reset(&mut self) {
        self.stage = Stage::Idle;
    }

    /// Ingest a platform image and run one detection
    pub fn detect_image(
        &mut self,
        source: &DynamicImage,
        flip: bool,
        vert_flip: bool,
    ) -> Result<DetectionResult> {
        let buffer = RasterBuffer::render_from_image(source, flip, vert_flip)?;
        Ok(self.detect(buffer))
    }

    /// Run one detection over an owned grayscale buffer.
    ///
    /// Takes the buffer by value: the pipeline owns the frame's image data
    /// for the duration of the run and the contrast stage mutates it in
    /// place.
    pub fn detect(&mut self, mut buffer: RasterBuffer) -> DetectionResult {
        self.reset();
        self.advance(Stage::BufferLoaded);

        if self.config.contrast == ContrastMode::Stretch {
            stretch_contrast(&mut buffer);
        }
        self.advance(Stage::Enhanced);

        let contours = trace_contours(&buffer, &self.config);
        if contours.is_empty() {
            debug!("no contours traced; frame is empty");
            return DetectionResult::not_found();
        }
        self.advance(Stage::ContoursTraced);

        let candidates = find_quads(&contours, &self.config);
        if candidates.is_empty() {
            debug!("{} contours but no quad candidates", contours.len());
            return DetectionResult::not_found();
        }
        self.advance(Stage::QuadSelected);

        for (rank, candidate) in candidates.iter().enumerate() {
            let patch = match rectify(&buffer, candidate, &self.config) {
                Ok(patch) => patch,
                Err(DetectError::DegenerateTransform) => {
                    debug!("candidate {} degenerate, trying next", rank);
                    continue;
                }
                Err(err) => {
                    debug!("candidate {} failed rectification: {}", rank, err);
                    continue;
                }
            };
            self.advance(Stage::Rectified);

            let decoded = decode_payload(&patch, &self.config);
            self.advance(Stage::Decoded);

            // The first rectifiable candidate decides the frame's outcome;
            // a checksum failure is terminal, not a cue to keep searching
            return if decoded.valid {
                DetectionResult::success(candidate.corners, decoded.bytes)
            } else {
                debug!("candidate {} checksum failed", rank);
                DetectionResult::corrupt(candidate.corners, decoded.bytes)
            };
        }

        debug!("all {} candidates degenerate", candidates.len());
        DetectionResult::not_found()
    }

    fn advance(&mut self, stage: Stage) {
        debug!("stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;

    #[test]
    fn test_blank_frame_is_not_found() {
        let mut pipeline = DetectionPipeline::new();
        let result = pipeline.detect(RasterBuffer::new(100, 100));
        assert!(!result.found);
        assert_eq!(result.outcome(), Outcome::NotFound);
        assert_eq!(pipeline.stage(), Stage::Enhanced);
    }

    #[test]
    fn test_solid_quad_is_found_but_corrupt() {
        // A featureless black square carries an all-ones "payload" whose
        // checksum cannot verify
        let mut gray = vec![255u8; 100 * 100];
        for y in 20..80 {
            for x in 20..80 {
                gray[y * 100 + x] = 0;
            }
        }
        let buffer = RasterBuffer::from_gray(gray, 100, 100).unwrap();

        let mut pipeline = DetectionPipeline::new();
        let result = pipeline.detect(buffer);
        assert!(result.found);
        assert!(!result.payload_valid);
        assert_eq!(result.outcome(), Outcome::Corrupt);
        assert_eq!(pipeline.stage(), Stage::Decoded);
        assert!(result.corners.is_some());
    }

    #[test]
    fn test_repeated_detects_are_independent() {
        let mut pipeline = DetectionPipeline::new();

        let empty = pipeline.detect(RasterBuffer::new(64, 64));
        assert!(!empty.found);

        let mut gray = vec![255u8; 64 * 64];
        for y in 10..50 {
            for x in 10..50 {
                gray[y * 64 + x] = 0;
            }
        }
        let found = pipeline.detect(RasterBuffer::from_gray(gray, 64, 64).unwrap());
        assert!(found.found);

        // No carry-over: an empty frame after a hit is still empty
        let empty_again = pipeline.detect(RasterBuffer::new(64, 64));
        assert_eq!(empty_again, DetectionResult::not_found());
    }
}
