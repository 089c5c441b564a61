//! AIS link-layer framing codec
//!
//! The transmit chain turns a six-bit payload into line levels,
//!
//! ```txt
//! payload → flip byte bits → append CRC → stuff → frame → NRZI
//! ```
//!
//! and the receive chain undoes each step in reverse. All
//! operations are pure functions of their inputs.

mod armor;
mod crc;
mod fields;
mod framing;
mod nrzi;
mod stuffing;

pub use armor::{format_sentence, pack6bit, payload_field, unpack6bit};
pub use crc::{append_crc, compute_crc16, split_crc, CRC_BITS};
pub use fields::{extract_fields, AisFrame, NavigationStatus};
pub use framing::{deframe, delimit_frame, flip_byte_bits, flip_byte_bits_truncating, frame};
pub use nrzi::{line_decode, line_encode};
pub use stuffing::{destuff, stuff};

use crate::bits::BitVector;
use crate::error::AisError;

/// A decoded frame and its checksum verdict
///
/// Frames which fail their checksum are still decoded so that
/// the caller may inspect them. Check [`crc_ok`](DecodedFrame::crc_ok)
/// before trusting the fields.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedFrame {
    /// Decoded message fields
    pub frame: AisFrame,

    /// True if the frame check sequence matched
    pub crc_ok: bool,
}

/// Encode payload bits into NRZI line levels
///
/// `payload` is a six-bit payload, unpacked most significant bit
/// first. It must be a whole number of bytes; a Type 1 payload is
/// 168 bits.
pub fn encode(payload: &[bool]) -> Result<BitVector, AisError> {
    let flipped = flip_byte_bits(payload)?;
    let checked = append_crc(&flipped);
    let stuffed = stuff(&checked);
    Ok(line_encode(&frame(&stuffed)))
}

/// Encode an `!AIVDM` sentence into NRZI line levels
///
/// The payload is taken from the sentence's sixth field.
pub fn encode_sentence(sentence: &str) -> Result<BitVector, AisError> {
    let payload = unpack6bit(payload_field(sentence)?)?;
    encode(&payload)
}

/// Decode a framed burst
///
/// `bits` are line-decoded bits which start at the first ramp-up
/// bit. Exactly the header and trailer lengths are removed from
/// each end; see [`deframe()`].
pub fn decode(bits: &[bool]) -> Result<DecodedFrame, AisError> {
    decode_stuffed(&deframe(bits)?)
}

/// Decode stuffed data
///
/// `bits` are the stuffed data and checksum between the start
/// and end flags. After destuffing, the last sixteen bits are
/// verified as the CRC of the rest. Fields are extracted even if
/// the CRC fails.
pub fn decode_stuffed(bits: &[bool]) -> Result<DecodedFrame, AisError> {
    let (message, crc_ok) = split_crc(&destuff(bits));
    let payload = flip_byte_bits_truncating(&message);
    Ok(DecodedFrame {
        frame: extract_fields(&payload)?,
        crc_ok,
    })
}
