//! Preamble and start flag correlator
//!
//! Every AIS burst opens with the same 32 bits: an alternating
//! preamble followed by the HDLC start flag. The correlator
//! slides a 256-bit detection block over the received bits and
//! scores bits `[8, 40)` of each block, where the sync sequence
//! sits after the ramp-up, against the known sequence.
//!
//! Scores are inner products of the ±1-mapped bits. With 32 bits
//! these are even integers in `[-32, 32]`, and a score of 32 is
//! an exact match.

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use arrayvec::ArrayVec;

use crate::codec::line_decode;
use crate::error::AisError;
use crate::waveform::{BLOCK_LEN, FLAG_BITS, PREAMBLE_BITS, RAMP_UP_BITS, SYNC_WORD};

/// Bits in the sync sequence
const SYNC_BITS: usize = PREAMBLE_BITS + FLAG_BITS;

/// Outcome of one correlator search
///
/// The best-scoring block is always reported. Its bits are
/// copied out only if the score clears the threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectionResult {
    /// True if the best score met the threshold
    pub detected: bool,

    /// Start of the best-scoring block
    ///
    /// This is the index of the block's first bit, which is the
    /// first ramp-up bit of a detected burst.
    pub window_start: usize,

    /// Score of the best-scoring block, in `[-32, 32]`
    pub correlation: i32,

    /// Line-decoded bits of the detected block
    pub block: Option<ArrayVec<bool, BLOCK_LEN>>,
}

/// Sliding-window preamble detector
///
/// ```
/// use aisburst::PreambleCorrelator;
///
/// let correlator = PreambleCorrelator::new(30).unwrap();
/// assert_eq!(30, correlator.threshold());
///
/// // odd thresholds are not reachable
/// assert!(PreambleCorrelator::new(31).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreambleCorrelator {
    threshold: i32,
}

impl PreambleCorrelator {
    /// Create with a detection threshold
    ///
    /// The `threshold` is the minimum score for a detection. It
    /// must be even and within `[-32, 32]`. A threshold of 32
    /// requires an error-free sync sequence, and each lower step
    /// of two admits one more bit error.
    pub fn new(threshold: i32) -> Result<Self, AisError> {
        if !(-32..=32).contains(&threshold) || threshold % 2 != 0 {
            return Err(AisError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    /// Detection threshold
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Search demodulated bits for a burst
    ///
    /// The `bits` are NRZI line levels, as they come from the
    /// demodulator. They are line-decoded first, and the
    /// returned block is line-decoded.
    pub fn detect(&self, bits: &[bool]) -> Result<DetectionResult, AisError> {
        self.detect_line_decoded(&line_decode(bits))
    }

    /// Search line-decoded bits for a burst
    ///
    /// Every block start from `0` through `bits.len() - 256` is
    /// scored. Ties go to the earliest block. Inputs shorter than
    /// one block are an error.
    pub fn detect_line_decoded(&self, bits: &[bool]) -> Result<DetectionResult, AisError> {
        if bits.len() < BLOCK_LEN {
            return Err(AisError::SignalTooShort {
                len: bits.len(),
                needed: BLOCK_LEN,
            });
        }

        // prime the register with all but the last sync bit
        // of the first block
        let mut correlator = SyncCorrelator::new(SYNC_WORD);
        for &bit in &bits[RAMP_UP_BITS..RAMP_UP_BITS + SYNC_BITS - 1] {
            correlator.push(bit);
        }

        let mut best_score = i32::MIN;
        let mut best_start = 0;
        for start in 0..=bits.len() - BLOCK_LEN {
            let score = correlator.push(bits[start + RAMP_UP_BITS + SYNC_BITS - 1]);
            if score > best_score {
                best_score = score;
                best_start = start;
            }
        }

        let detected = best_score >= self.threshold;
        let block = if detected {
            Some(
                bits[best_start..best_start + BLOCK_LEN]
                    .iter()
                    .copied()
                    .collect(),
            )
        } else {
            None
        };

        debug!(
            "correlator: best score {} at bit {} (threshold {}): {}",
            best_score,
            best_start,
            self.threshold,
            if detected { "detected" } else { "no burst" }
        );

        Ok(DetectionResult {
            detected,
            window_start: best_start,
            correlation: best_score,
            block,
        })
    }
}

// Shift-register correlator for the sync sequence
//
// Bits are shifted in from the right, so the oldest of the
// last 32 bits is the most significant. After 32 pushes, the
// register holds a window which can be compared directly
// with the sync word.
#[derive(Clone, Debug)]
struct SyncCorrelator {
    sync_to: u32,
    data: u32,
}

impl SyncCorrelator {
    fn new(sync_to: u32) -> Self {
        Self { sync_to, data: 0 }
    }

    // Shift in `bit` and score the last 32 bits
    fn push(&mut self, bit: bool) -> i32 {
        self.data = (self.data << 1) | bit as u32;
        let errors = (self.sync_to ^ self.data).count_ones() as i32;
        SYNC_BITS as i32 - 2 * errors
    }
}
