//! NRZI line coding
//!
//! AIS keys the transmitter with Non-Return-to-Zero Inverted
//! symbols: data are carried by the *presence* of level changes
//! rather than by the levels themselves. This makes the link
//! immune to a polarity inversion anywhere in the chain.
//!
//! Here a **zero** bit toggles the line level and a one bit
//! holds it. The line starts at level zero.

use crate::bits::BitVector;

/// Encode data bits as NRZI line levels
pub fn line_encode(bits: &[bool]) -> BitVector {
    let mut level = false;
    bits.iter()
        .map(|&bit| {
            if !bit {
                level = !level;
            }
            level
        })
        .collect()
}

/// Recover data bits from NRZI line levels
///
/// A change of level decodes as zero, and a held level as one.
/// The reference level starts at zero, so the first symbol is
/// compared against the same initial state the encoder uses.
pub fn line_decode(levels: &[bool]) -> BitVector {
    let mut state = false;
    levels
        .iter()
        .map(|&level| {
            if level != state {
                state = level;
                false
            } else {
                true
            }
        })
        .collect()
}
