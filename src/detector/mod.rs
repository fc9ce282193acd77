//! Marker detection stages
//!
//! This module contains the geometric half of the pipeline:
//! - Contour tracing (boundaries of dark regions)
//! - Quad finding (polygon reduction and convexity/angle filtering)
//! - Rectification (homography onto the fixed sampling grid)

/// Boundary contour tracing over the binarized buffer
pub mod contour;
/// Quad candidate extraction and ranking
pub mod quad;
/// Perspective rectification onto the sampling grid
pub mod rectify;
