//! Utility functions for image processing
//!
//! This module provides the pixel-level helpers the detection stages build
//! on:
//! - Grayscale conversion (RGB to luminance)
//! - Contrast stretching (histogram min/max rescale)
//! - Geometry (homography solving, polygon measurements)

pub mod contrast;
pub mod geometry;
pub mod grayscale;
