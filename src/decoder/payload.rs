//! Bit sampling and payload assembly from a rectified patch

use crate::config::DetectorConfig;
use crate::decoder::checksum;
use crate::detector::contour::BINARY_THRESHOLD;
use crate::detector::rectify::RectifiedPatch;

/// Payload bytes plus the checksum verdict.
///
/// `valid == false` is a normal outcome for a corrupted or falsely detected
/// quad; the bytes are still returned for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// Payload bytes with the trailing checksum byte stripped
    pub bytes: Vec<u8>,
    /// Whether the trailing checksum byte matched
    pub valid: bool,
}

/// Sample the patch's data cells into bits and assemble the payload.
///
/// Cells are read row-major inside the border margin; each cell's mean
/// intensity thresholds to one bit (dark = 1). Bits pack most-significant
/// first into bytes; the final byte is the CRC-8 of the preceding ones.
pub fn decode_payload(patch: &RectifiedPatch, config: &DetectorConfig) -> DecodedPayload {
    let bits = sample_bits(patch, config);

    // Trailing bits of a non-byte-aligned grid carry no payload
    let mut bytes = vec![0u8; bits.len() / 8];
    for (i, &bit) in bits.iter().enumerate().take(bytes.len() * 8) {
        if bit {
            bytes[i / 8] |= 0x80 >> (i % 8);
        }
    }

    let (payload, checksum_byte) = match bytes.split_last() {
        Some((last, rest)) => (rest.to_vec(), *last),
        None => (Vec::new(), 0),
    };
    let valid = !bytes.is_empty() && checksum::verify(&payload, checksum_byte);

    DecodedPayload {
        bytes: payload,
        valid,
    }
}

/// Threshold each data cell's mean intensity, row-major, skipping the border
fn sample_bits(patch: &RectifiedPatch, config: &DetectorConfig) -> Vec<bool> {
    let spc = config.samples_per_cell;
    let border = config.border_cells;
    let mut bits = Vec::with_capacity(config.grid_cells * config.grid_cells);

    for cy in 0..config.grid_cells {
        for cx in 0..config.grid_cells {
            let x0 = (border + cx) * spc;
            let y0 = (border + cy) * spc;
            let mut sum = 0u32;
            for sy in 0..spc {
                for sx in 0..spc {
                    sum += patch.sample(x0 + sx, y0 + sy) as u32;
                }
            }
            let mean = (sum / (spc * spc) as u32) as u8;
            bits.push(mean < BINARY_THRESHOLD);
        }
    }

    bits
}

/// Render a payload into the marker's cell grid (true = dark cell), border
/// included. The inverse of [`decode_payload`]; used to build synthetic
/// markers for tests and benches.
pub fn encode_payload(payload: &[u8], config: &DetectorConfig) -> Vec<bool> {
    let bit_count = config.grid_cells * config.grid_cells;
    assert_eq!(
        payload.len(),
        config.payload_len(),
        "payload must be exactly {} bytes for a {}x{} grid",
        config.payload_len(),
        config.grid_cells,
        config.grid_cells,
    );

    let mut bytes = payload.to_vec();
    bytes.push(checksum::crc8(payload));

    let mut bits = Vec::with_capacity(bit_count);
    for i in 0..bit_count {
        // Cells past the last full byte stay light
        let byte = bytes.get(i / 8).copied().unwrap_or(0);
        bits.push(byte & (0x80 >> (i % 8)) != 0);
    }

    let total = config.total_cells();
    let border = config.border_cells;
    let mut cells = vec![false; total * total];
    for (cy, row) in cells.chunks_mut(total).enumerate() {
        for (cx, cell) in row.iter_mut().enumerate() {
            let in_border = cy < border
                || cy >= total - border
                || cx < border
                || cx >= total - border;
            if in_border {
                // Border cells are dark so the marker outline traces as one
                // solid quad
                *cell = true;
            } else {
                *cell = bits[(cy - border) * config.grid_cells + (cx - border)];
            }
        }
    }

    cells
}
