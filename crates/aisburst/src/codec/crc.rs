//! CRC-16-CCITT frame check sequence
//!
//! AIS protects every HDLC frame with the CCITT polynomial
//!
//! ```txt
//! x^16 + x^12 + x^5 + 1
//! ```
//!
//! The register is preset to all ones, the message is augmented
//! with sixteen zero bits, and the remainder is inverted. This is
//! bit-for-bit the same as the common unreflected CRC-16 with
//! `poly = 0x1021`, `init = 0xFFFF`, and `xorout = 0xFFFF`.

use crate::bits::BitVector;

/// Generator polynomial, including the x^16 term
const POLY: u32 = 0x1_1021;

/// Checksum width in bits
pub const CRC_BITS: usize = 16;

/// Compute the CRC-16 of a bit sequence
///
/// The register is a 17-bit window. Each incoming bit is
/// shifted in from the right. When a one is shifted out the
/// top of the 16-bit remainder, the window is reduced by the
/// polynomial.
pub fn compute_crc16(bits: &[bool]) -> u16 {
    let augmented = bits
        .iter()
        .copied()
        .chain(std::iter::repeat(false).take(CRC_BITS));

    let mut reg = 0u32;
    for (i, bit) in augmented.enumerate() {
        // preset: invert the first sixteen bits
        let bit = bit ^ (i < CRC_BITS);
        reg = (reg << 1) | bit as u32;
        if reg & 0x1_0000 != 0 {
            reg ^= POLY;
        }
    }

    !(reg as u16)
}

/// Append the CRC-16 of `bits`, most significant bit first
pub fn append_crc(bits: &[bool]) -> BitVector {
    let mut out = BitVector::with_capacity(bits.len() + CRC_BITS);
    out.extend(bits);
    out.push_int(compute_crc16(bits) as i64, CRC_BITS);
    out
}

/// Split off and verify a trailing CRC-16
///
/// Returns the message without its checksum and whether the
/// checksum matched. Inputs shorter than the checksum itself
/// never verify.
pub fn split_crc(bits: &[bool]) -> (BitVector, bool) {
    if bits.len() < CRC_BITS {
        return (BitVector::from(bits), false);
    }

    let (message, fcs) = bits.split_at(bits.len() - CRC_BITS);
    let received = BitVector::from(fcs).read_unsigned(0..CRC_BITS) as u16;
    (BitVector::from(message), received == compute_crc16(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_to_bits(bytes: &[u8]) -> BitVector {
        let mut out = BitVector::new();
        for &b in bytes {
            out.push_int(b as i64, 8);
        }
        out
    }

    // a conventional register-at-a-time CRC for comparison
    fn reference_crc16(bits: &[bool]) -> u16 {
        let mut crc = 0xFFFFu16;
        for &bit in bits {
            let top = (crc >> 15) as u8 ^ bit as u8;
            crc <<= 1;
            if top == 1 {
                crc ^= 0x1021;
            }
        }
        !crc
    }

    #[test]
    fn test_check_value() {
        let bits = bytes_to_bits(b"123456789");
        assert_eq!(0xD64E, compute_crc16(&bits));
    }

    #[test]
    fn test_matches_reference() {
        let mut bits = BitVector::new();
        let mut lfsr = 0xACE1u16;
        for len in 0..200 {
            assert_eq!(reference_crc16(&bits), compute_crc16(&bits), "len {}", len);
            lfsr = (lfsr >> 1) ^ ((lfsr & 1).wrapping_neg() & 0xB400);
            bits.push(lfsr & 1 == 1);
        }
    }

    #[test]
    fn test_append_and_split() {
        let msg = bytes_to_bits(&[0x04, 0x21, 0xFF, 0x00, 0x7E]);
        let with_crc = append_crc(&msg);
        assert_eq!(msg.len() + 16, with_crc.len());

        let (body, ok) = split_crc(&with_crc);
        assert!(ok);
        assert_eq!(msg, body);

        // every single-bit error is detected
        for i in 0..with_crc.len() {
            let mut corrupt = with_crc.clone();
            corrupt[i] = !corrupt[i];
            let (_, ok) = split_crc(&corrupt);
            assert!(!ok, "bit {} flip went undetected", i);
        }

        let (_, ok) = split_crc(&[true; 8]);
        assert!(!ok);
    }
}
