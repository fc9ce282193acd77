//! Error types for the qyoo_detect library
//!
//! Only genuinely exceptional conditions live here. "No marker in this
//! frame" and "checksum failed" are expected outcomes of scanning a live
//! stream and are reported through [`DetectionResult`](crate::DetectionResult)
//! flags, never through this error channel.

use thiserror::Error;

/// Result type alias for qyoo_detect operations
pub type Result<T> = std::result::Result<T, DetectError>;

/// Errors raised by buffer ingestion and the detection pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// Source image could not be converted to a grayscale pixel grid
    #[error("invalid image format: {reason}")]
    InvalidImageFormat {
        /// What made the source unusable
        reason: String,
    },

    /// Pixel access outside the buffer; indicates a caller bug, not bad input
    #[error("pixel access out of bounds: ({x}, {y}) in {width}x{height} buffer")]
    OutOfBounds {
        /// Requested x coordinate
        x: u32,
        /// Requested y coordinate
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Quad corners are numerically near-collinear; no stable homography
    /// exists. Recoverable per candidate: the pipeline moves on to the next
    /// ranked quad.
    #[error("degenerate perspective transform (near-collinear corners)")]
    DegenerateTransform,
}
