//! Six-bit ASCII armoring of AIVDM/AIVDO sentences
//!
//! AIS payloads travel over NMEA 0183 as printable text. Each
//! character carries six bits of the payload, most significant
//! bit first. The alphabet is split in two: `'0'..='W'` carry the
//! values 0–39, and `` '`'..='w' `` carry 40–63.

use lazy_static::lazy_static;
use regex::Regex;

use crate::bits::BitVector;
use crate::error::AisError;

/// Index of the payload among the sentence's comma-separated fields
const PAYLOAD_FIELD: usize = 5;

/// Extract the armored payload from a sentence
///
/// ```
/// let sentence = "!AIVDM,1,1,,A,15M67FC000G?ufbE`FepT@3n00Sa,0*5C";
/// assert_eq!(
///     "15M67FC000G?ufbE`FepT@3n00Sa",
///     aisburst::payload_field(sentence).unwrap()
/// );
/// ```
pub fn payload_field(sentence: &str) -> Result<&str, AisError> {
    sentence.split(',').nth(PAYLOAD_FIELD).ok_or_else(|| {
        AisError::MalformedPayload(format!(
            "sentence has fewer than {} fields",
            PAYLOAD_FIELD + 1
        ))
    })
}

/// Expand an armored payload into bits
///
/// Every character becomes six bits, most significant first.
/// Empty payloads and characters outside the armor alphabet
/// are rejected.
pub fn unpack6bit(payload: &str) -> Result<BitVector, AisError> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[0-W`-w]+$").expect("bad armor regexp");
    }

    if payload.is_empty() {
        return Err(AisError::MalformedPayload("empty payload".to_owned()));
    }
    if !RE.is_match(payload) {
        return Err(AisError::MalformedPayload(format!(
            "\"{}\" contains characters outside the six-bit alphabet",
            payload
        )));
    }

    let mut out = BitVector::with_capacity(payload.len() * 6);
    for c in payload.bytes() {
        let sixbit = if c >= b'X' { c - 56 } else { c - 48 };
        out.push_int(sixbit as i64, 6);
    }
    Ok(out)
}

/// Armor bits into six-bit ASCII
///
/// The inverse of [`unpack6bit()`]. The number of bits must be a
/// multiple of six.
pub fn pack6bit(bits: &[bool]) -> Result<String, AisError> {
    if bits.len() % 6 != 0 {
        return Err(AisError::MalformedPayload(format!(
            "{} bits do not armor into whole characters",
            bits.len()
        )));
    }

    Ok(bits
        .chunks(6)
        .map(|chunk| {
            let v = chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8);
            if v < 40 {
                (v + 48) as char
            } else {
                (v + 56) as char
            }
        })
        .collect())
}

/// Wrap an armored payload in a single-fragment `!AIVDM` sentence
///
/// The sentence is sent on radio channel `A` with no fill bits
/// and carries a valid NMEA checksum.
pub fn format_sentence(payload: &str) -> String {
    let body = format!("AIVDM,1,1,,A,{},0", payload);
    let checksum = body.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("!{}*{:02X}", body, checksum)
}
