//! CRC-8 checksum over the payload bytes
//!
//! Polynomial 0x07 (CRC-8/ATM), init 0x00, no reflection. One checksum byte
//! trails the payload in the marker's bit grid; a mismatch marks the frame
//! Corrupt rather than erroring, since falsely detected quads are routine.

const POLY: u8 = 0x07;

/// Compute the CRC-8 of a byte slice
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Check a payload against its trailing checksum byte
pub fn verify(payload: &[u8], checksum: u8) -> bool {
    crc8(payload) == checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // Standard CRC-8/ATM check value for "123456789"
        assert_eq!(crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(crc8(&[]), 0x00);
        assert!(verify(&[], 0x00));
    }

    #[test]
    fn test_single_bit_flip_detected() {
        let payload = [0x51, 0x00, 0xAB, 0x33, 0x7F, 0x02, 0x90];
        let checksum = crc8(&payload);
        assert!(verify(&payload, checksum));

        let mut corrupted = payload;
        corrupted[3] ^= 0x08;
        assert!(!verify(&corrupted, checksum));
    }
}
