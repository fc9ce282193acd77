//! Payload decoding from the rectified sampling grid
//!
//! This module contains everything after rectification:
//! - Cell sampling (mean-intensity thresholding into bits)
//! - Payload assembly (row-major, most-significant-bit first)
//! - Checksum verification (CRC-8 trailing byte)

/// CRC-8 checksum over the payload bytes
pub mod checksum;
/// Bit sampling and payload assembly
pub mod payload;

pub use payload::{DecodedPayload, decode_payload, encode_payload};
