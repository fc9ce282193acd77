use super::Point;

/// Terminal state of one detection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A marker was located and its payload checksum verified
    Success,
    /// No marker-like shape in this frame; routine for live streams
    NotFound,
    /// A quad was located and sampled but the payload checksum failed
    Corrupt,
}

/// Result of running the pipeline over one frame.
///
/// Constructed once per `detect` call and handed to the caller; the pipeline
/// retains nothing across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    /// Whether a marker-shaped quad was located
    pub found: bool,
    /// Corner points in image coordinates, clockwise from the corner nearest
    /// the image origin; absent when nothing was found
    pub corners: Option<[Point; 4]>,
    /// Decoded payload bytes, checksum byte stripped; absent when nothing
    /// was found
    pub payload: Option<Vec<u8>>,
    /// Whether the payload checksum verified
    pub payload_valid: bool,
}

impl DetectionResult {
    /// Build the routine empty-frame result
    pub fn not_found() -> Self {
        Self {
            found: false,
            corners: None,
            payload: None,
            payload_valid: false,
        }
    }

    /// Build a result for a located marker with a verified payload
    pub fn success(corners: [Point; 4], payload: Vec<u8>) -> Self {
        Self {
            found: true,
            corners: Some(corners),
            payload: Some(payload),
            payload_valid: true,
        }
    }

    /// Build a result for a located marker whose checksum failed
    pub fn corrupt(corners: [Point; 4], payload: Vec<u8>) -> Self {
        Self {
            found: true,
            corners: Some(corners),
            payload: Some(payload),
            payload_valid: false,
        }
    }

    /// Collapse the flags into the terminal state of the run
    pub fn outcome(&self) -> Outcome {
        match (self.found, self.payload_valid) {
            (false, _) => Outcome::NotFound,
            (true, true) => Outcome::Success,
            (true, false) => Outcome::Corrupt,
        }
    }
}
