//! Burst transmitter

use num_complex::Complex;

use crate::builder::GmskBuilder;
use crate::codec::{encode, encode_sentence, AisFrame};
use crate::error::AisError;
use crate::modulate::GmskModulator;

/// An AIS burst transmitter
///
/// Frames a payload, line-codes it, and modulates it to complex
/// baseband in one step.
///
/// ```
/// use aisburst::{AisFrame, GmskBuilder};
///
/// let tx = GmskBuilder::default().build_transmitter();
/// let frame = AisFrame::new(1, 305323000, -6.233335, 47.99603, 25.3).unwrap();
/// let burst = tx.transmit_frame(&frame).unwrap();
/// assert!(burst.len() > 256 * 10);
/// ```
#[derive(Clone, Debug)]
pub struct AisTransmitter {
    modulator: GmskModulator,
}

impl AisTransmitter {
    /// Create from a modulator
    pub fn new(modulator: GmskModulator) -> Self {
        Self { modulator }
    }

    /// Transmit a Type 1 position report
    pub fn transmit_frame(&self, frame: &AisFrame) -> Result<Vec<Complex<f32>>, AisError> {
        let levels = encode(&frame.to_payload_bits())?;
        self.modulator.modulate(&levels)
    }

    /// Transmit the payload of an `!AIVDM` sentence
    ///
    /// The payload must unpack to a whole number of bytes.
    pub fn transmit_sentence(&self, sentence: &str) -> Result<Vec<Complex<f32>>, AisError> {
        let levels = encode_sentence(sentence)?;
        self.modulator.modulate(&levels)
    }

    /// The modulator
    pub fn modulator(&self) -> &GmskModulator {
        &self.modulator
    }
}

impl From<&GmskBuilder> for AisTransmitter {
    fn from(cfg: &GmskBuilder) -> Self {
        Self::new(cfg.build_modulator())
    }
}
