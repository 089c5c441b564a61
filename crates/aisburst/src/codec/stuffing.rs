//! HDLC bit stuffing
//!
//! The HDLC flag `01111110` is the only place six consecutive
//! ones may appear on the air. The transmitter inserts a zero
//! after every run of five ones, and the receiver removes it.

use crate::bits::BitVector;

/// Longest run of ones permitted in stuffed data
const MAX_RUN: usize = 5;

/// Insert a zero after every run of five ones
///
/// The run counter restarts after the inserted zero, so a
/// run is never counted twice.
pub fn stuff(bits: &[bool]) -> BitVector {
    let mut out = BitVector::with_capacity(bits.len() + bits.len() / MAX_RUN);
    let mut run = 0;
    for &bit in bits {
        out.push(bit);
        run = if bit { run + 1 } else { 0 };
        if run == MAX_RUN {
            out.push(false);
            run = 0;
        }
    }
    out
}

/// Remove the bit following every run of five ones
///
/// The stuffed bit is discarded without being inspected. Any
/// bits after the last run are copied through verbatim.
pub fn destuff(bits: &[bool]) -> BitVector {
    let mut out = BitVector::with_capacity(bits.len());
    let mut run = 0;
    let mut iter = bits.iter();
    while let Some(&bit) = iter.next() {
        out.push(bit);
        run = if bit { run + 1 } else { 0 };
        if run == MAX_RUN {
            let _ = iter.next();
            run = 0;
        }
    }
    out
}
