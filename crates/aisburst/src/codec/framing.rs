//! HDLC framing and byte bit order
//!
//! A framed AIS burst looks like
//!
//! ```txt
//! [ramp-up] [preamble] [flag] [stuffed data + CRC] [flag] [buffer]
//!     8         24        8         variable          8      24
//! ```
//!
//! The ramp-up and buffer are all zeros. The preamble is an
//! alternating `0101…01` training sequence, and the flag is
//! `01111110`. Because of bit stuffing, the flag is the only place
//! where six consecutive ones can appear.

use crate::bits::BitVector;
use crate::error::AisError;
use crate::waveform::{
    BUFFER_BITS, FLAG, FLAG_BITS, HEADER_BITS, PREAMBLE, PREAMBLE_BITS, RAMP_UP_BITS,
    TRAILER_BITS,
};

/// Surround stuffed data with the burst header and trailer
pub fn frame(bits: &[bool]) -> BitVector {
    let mut out = BitVector::with_capacity(HEADER_BITS + bits.len() + TRAILER_BITS);
    out.extend(std::iter::repeat(false).take(RAMP_UP_BITS));
    out.push_int(PREAMBLE as i64, PREAMBLE_BITS);
    out.push_int(FLAG as i64, FLAG_BITS);
    out.extend(bits);
    out.push_int(FLAG as i64, FLAG_BITS);
    out.extend(std::iter::repeat(false).take(BUFFER_BITS));
    out
}

/// Strip the burst header and trailer
///
/// Removes exactly as many bits as [`frame()`] adds from each
/// end. The contents of the header and trailer are not checked.
/// Bursts which are too short to contain any data are an error.
pub fn deframe(bits: &[bool]) -> Result<BitVector, AisError> {
    if bits.len() <= HEADER_BITS + TRAILER_BITS {
        return Err(AisError::FrameTooShort(bits.len()));
    }

    Ok(BitVector::from(
        &bits[HEADER_BITS..bits.len() - TRAILER_BITS],
    ))
}

/// Locate the stuffed data of a burst by its closing flag
///
/// `bits` are line-decoded bits, and `start` is the index of the
/// first ramp-up bit. The data begins right after the start flag
/// and ends just before the first run of six ones, which belongs
/// to the closing flag.
///
/// Stuffing makes the data longer than its nominal size, so a
/// fixed-length [`deframe()`] may cut it short. This method finds
/// the true extent. Returns `None` if no closing flag follows the
/// start flag.
pub fn delimit_frame(bits: &[bool], start: usize) -> Option<BitVector> {
    let data_start = start.checked_add(HEADER_BITS)?;
    let tail = bits.get(data_start..)?;

    let run_start = tail
        .windows(FLAG_BITS - 2)
        .position(|w| w.iter().all(|b| *b))?;

    // the flag's leading zero precedes the run
    let data_len = run_start.checked_sub(1)?;
    if data_len == 0 {
        return None;
    }
    Some(BitVector::from(&tail[0..data_len]))
}

/// Reverse the bit order within every byte
///
/// AIS transmits each byte least significant bit first, but
/// six-bit payloads are packed most significant bit first. This
/// method converts between the two. The input must be a whole
/// number of bytes.
pub fn flip_byte_bits(bits: &[bool]) -> Result<BitVector, AisError> {
    if bits.len() % 8 != 0 {
        return Err(AisError::NotByteAligned(bits.len()));
    }
    Ok(flip_byte_bits_truncating(bits))
}

/// Reverse the bit order within every byte, dropping any partial byte
///
/// Like [`flip_byte_bits()`], but a trailing partial byte is
/// discarded instead of rejected. Received frames may carry
/// extra bits, and these are of no use to the field decoder.
pub fn flip_byte_bits_truncating(bits: &[bool]) -> BitVector {
    bits.chunks_exact(8)
        .flat_map(|byte| byte.iter().rev().copied())
        .collect()
}
