//! Error type for the AIS physical layer

use thiserror::Error;

/// Error processing an AIS burst
///
/// Only malformed *inputs* are errors. A frame whose checksum
/// does not verify is still decoded and reported through
/// [`DecodedFrame::crc_ok`](crate::DecodedFrame::crc_ok), and a
/// detector which finds nothing returns a
/// [`DetectionResult`](crate::DetectionResult) with
/// `detected == false`.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum AisError {
    /// Sentence or six-bit payload could not be parsed
    #[error("malformed AIS payload: {0}")]
    MalformedPayload(String),

    /// Bit count is not a whole number of bytes
    #[error("bit vector of length {0} is not byte-aligned")]
    NotByteAligned(usize),

    /// Framed burst is too short to contain any data
    #[error("frame of {0} bits is too short to deframe (need more than 72)")]
    FrameTooShort(usize),

    /// Payload is too short for the Type 1 field layout
    #[error("payload of {len} bits is too short (need {needed})")]
    PayloadTooShort { len: usize, needed: usize },

    /// A message field is outside of its legal range
    #[error("field {field} out of range: {value}")]
    FieldOutOfRange { field: &'static str, value: f64 },

    /// Signal contains no samples
    #[error("signal is empty")]
    EmptySignal,

    /// Signal is shorter than the processing window
    #[error("signal of length {len} is shorter than required length {needed}")]
    SignalTooShort { len: usize, needed: usize },

    /// Noise buffer cannot hold the signal
    #[error("noise buffer of length {buffer} cannot hold signal of length {signal}")]
    BufferTooShort { buffer: usize, signal: usize },

    /// Signal-to-noise ratio is not a number
    #[error("invalid signal-to-noise ratio: {0} dB")]
    InvalidSnr(f32),

    /// Correlation threshold must be even and within [-32, 32]
    #[error("invalid detection threshold {0}: must be even and within [-32, 32]")]
    InvalidThreshold(i32),

    /// Recorded sample text could not be parsed
    #[error("malformed I/Q sample on line {line}")]
    MalformedSample { line: usize },
}
