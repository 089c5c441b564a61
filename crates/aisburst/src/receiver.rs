//! Full receiver chain

#[cfg(not(test))]
use log::{debug, info};

#[cfg(test)]
use std::println as debug;
#[cfg(test)]
use std::println as info;

use std::convert::TryFrom;

use num_complex::Complex;

use crate::builder::ReceiverBuilder;
use crate::codec::{decode, decode_stuffed, delimit_frame, line_decode, DecodedFrame};
use crate::demod::GmskDemodulator;
use crate::detect::{DetectionResult, PreambleCorrelator};
use crate::error::AisError;

/// A detected and decoded burst
#[derive(Clone, Debug, PartialEq)]
pub struct ReceivedBurst {
    /// Correlator output for the burst
    pub detection: DetectionResult,

    /// Estimated index of the burst's first sample
    ///
    /// This is accurate to within one symbol.
    pub sample_offset: usize,

    /// Decoded frame
    pub decoded: DecodedFrame,
}

/// A complete AIS burst receiver
///
/// The receive chain takes complex baseband samples and
/// performs the following operations:
///
/// 1. (Optional) Carrier frequency offset compensation
/// 2. Differential GMSK demodulation to one bit per symbol
/// 3. NRZI line decoding
/// 4. Preamble and start flag correlation
/// 5. Delimiting the frame by its closing flag
/// 6. Destuffing, CRC verification, and field decoding
///
/// To create the receiver, first create its Builder:
///
/// ```
/// use aisburst::ReceiverBuilder;
///
/// let receiver = ReceiverBuilder::default().build().unwrap();
/// assert_eq!(receiver.threshold(), 32);
/// ```
#[derive(Clone, Debug)]
pub struct AisReceiver {
    demod: GmskDemodulator,
    correlator: PreambleCorrelator,
    compensate_frequency: bool,
}

impl AisReceiver {
    /// Search for and decode one burst
    ///
    /// The `signal` must be at the builder's sampling rate and
    /// should contain at most one burst. Returns `None` if no
    /// burst clears the detection threshold.
    ///
    /// A detected burst is always decoded, even if its CRC
    /// fails. Check
    /// [`crc_ok`](crate::DecodedFrame::crc_ok) before trusting
    /// it.
    ///
    /// Signals shorter than one detection block are an error.
    pub fn receive(&self, signal: &[Complex<f32>]) -> Result<Option<ReceivedBurst>, AisError> {
        let compensated;
        let signal = if self.compensate_frequency {
            compensated = self.demod.compensate_frequency_shift(signal)?;
            compensated.as_slice()
        } else {
            signal
        };

        let bits = line_decode(&self.demod.demodulate(signal)?);
        let detection = self.correlator.detect_line_decoded(&bits)?;
        if !detection.detected {
            debug!(
                "receiver: no burst (best score {})",
                detection.correlation
            );
            return Ok(None);
        }

        let decoded = decode_detected(&bits, &detection)?;
        if decoded.crc_ok {
            info!(
                "receiver: burst at bit {}: {}",
                detection.window_start, decoded.frame
            );
        } else {
            debug!(
                "receiver: burst at bit {} failed CRC",
                detection.window_start
            );
        }

        Ok(Some(ReceivedBurst {
            sample_offset: detection.window_start * self.demod.upsampling(),
            detection,
            decoded,
        }))
    }

    /// Correlator detection threshold
    pub fn threshold(&self) -> i32 {
        self.correlator.threshold()
    }

    /// True if frequency compensation is enabled
    pub fn frequency_compensation(&self) -> bool {
        self.compensate_frequency
    }

    /// Samples per symbol
    pub fn upsampling(&self) -> usize {
        self.demod.upsampling()
    }
}

impl TryFrom<&ReceiverBuilder> for AisReceiver {
    type Error = AisError;

    fn try_from(cfg: &ReceiverBuilder) -> Result<Self, Self::Error> {
        Ok(Self {
            demod: cfg.gmsk().build_demodulator(),
            correlator: cfg.build_correlator()?,
            compensate_frequency: cfg.frequency_compensation(),
        })
    }
}

// Decode a detected burst
//
// Bit stuffing may push the end of the frame past the
// detection block, so we first look for the closing flag in
// the full bit stream. If there isn't one, or if it gives
// too little data, we decode the fixed-size block instead.
fn decode_detected(bits: &[bool], detection: &DetectionResult) -> Result<DecodedFrame, AisError> {
    if let Some(stuffed) = delimit_frame(bits, detection.window_start) {
        match decode_stuffed(&stuffed) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => debug!("receiver: delimited frame unusable: {}", e),
        }
    }

    match &detection.block {
        Some(block) => decode(block),
        None => decode(&bits[detection.window_start..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    use crate::builder::{ChannelBuilder, GmskBuilder};
    use crate::codec::AisFrame;
    use crate::detect::estimate_changepoint_waveform;

    fn frame() -> AisFrame {
        AisFrame::new(1, 305323000, -6.233335, 47.99603, 25.3).unwrap()
    }

    #[test]
    fn test_receive_noiseless() {
        let burst = GmskBuilder::default()
            .build_transmitter()
            .transmit_frame(&frame())
            .unwrap();
        let receiver = ReceiverBuilder::default().build().unwrap();

        let rx = receiver.receive(&burst).unwrap().expect("burst detected");
        assert!(rx.decoded.crc_ok);
        assert_eq!(0, rx.detection.window_start);
        assert_eq!(32, rx.detection.correlation);
        assert_eq!(305323000, rx.decoded.frame.mmsi());
        assert_approx_eq!(-6.233335, rx.decoded.frame.longitude(), 1e-6);
        assert_approx_eq!(47.99603, rx.decoded.frame.latitude(), 1e-6);
        assert_approx_eq!(25.3, rx.decoded.frame.course(), 1e-6);
    }

    #[test]
    fn test_receive_in_buffer() {
        let burst = GmskBuilder::default()
            .build_transmitter()
            .transmit_frame(&frame())
            .unwrap();
        let receiver = ReceiverBuilder::default().build().unwrap();
        let rotation = Complex::from_polar(1.0f32, 1.3);

        // sample offsets half a symbol from the receiver's
        // sampling instants are ambiguous, so avoid them
        for &offset in &[0usize, 13, 250, 1001, 1998] {
            let mut signal = vec![Complex::new(0.0f32, 0.0); burst.len() + 2000];
            for (out, sa) in signal[offset..].iter_mut().zip(burst.iter()) {
                *out = sa * rotation;
            }

            let rx = receiver.receive(&signal).unwrap().expect("burst detected");
            assert!(rx.decoded.crc_ok);
            assert_eq!(305323000, rx.decoded.frame.mmsi());
            assert!(
                (rx.sample_offset as isize - offset as isize).abs() <= 10,
                "estimated {} true {}",
                rx.sample_offset,
                offset
            );
        }
    }

    #[test]
    fn test_receive_nothing() {
        let receiver = ReceiverBuilder::default().build().unwrap();
        let silence = vec![Complex::new(1.0f32, 0.0); 4000];
        assert_eq!(None, receiver.receive(&silence).unwrap());

        assert!(matches!(
            receiver.receive(&silence[0..100]),
            Err(AisError::SignalTooShort { .. })
        ));
    }

    #[test]
    fn test_receive_with_compensation() {
        let burst = GmskBuilder::default()
            .build_transmitter()
            .transmit_frame(&frame())
            .unwrap();
        let receiver = ReceiverBuilder::default()
            .with_frequency_compensation(true)
            .build()
            .unwrap();
        assert!(receiver.frequency_compensation());

        let rx = receiver.receive(&burst).unwrap().expect("burst detected");
        assert!(rx.decoded.crc_ok);
        assert_eq!(305323000, rx.decoded.frame.mmsi());

        assert_eq!(Err(AisError::EmptySignal), receiver.receive(&[]));
    }

    #[test]
    fn test_receive_noisy() {
        let tx = GmskBuilder::default().build_transmitter();
        let receiver = ReceiverBuilder::default().build().unwrap();
        let mut channel = ChannelBuilder::new(30.0)
            .with_random_phase(true)
            .build(StdRng::seed_from_u64(0x41_4953));
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..8 {
            let frame = AisFrame::random(&mut rng);
            let burst = tx.transmit_frame(&frame).unwrap();
            let out = channel.propagate(&burst).unwrap();

            let rx = receiver
                .receive(&out.samples)
                .unwrap()
                .expect("burst detected");
            assert!(rx.decoded.crc_ok);
            assert_eq!(frame.mmsi(), rx.decoded.frame.mmsi());
            assert_eq!(frame.nav_status(), rx.decoded.frame.nav_status());
            assert_approx_eq!(frame.course(), rx.decoded.frame.course(), 1e-9);
        }

        // noise alone is never a burst
        let noise = Normal::new(0.0f32, 0.7).unwrap();
        let hush: Vec<Complex<f32>> = (0..4000)
            .map(|_| Complex::new(noise.sample(&mut rng), noise.sample(&mut rng)))
            .collect();
        assert_eq!(None, receiver.receive(&hush).unwrap());
    }

    #[test]
    fn test_changepoint_locates_burst_in_buffer() {
        let burst = GmskBuilder::default()
            .build_transmitter()
            .transmit_frame(&frame())
            .unwrap();
        let mut channel = ChannelBuilder::new(20.0)
            .with_buffer_len(burst.len() + 400)
            .build(StdRng::seed_from_u64(77));

        for _ in 0..4 {
            let out = channel.propagate(&burst).unwrap();
            let offset = out.offset.expect("buffered channel");

            // keep only the rising edge
            let t = estimate_changepoint_waveform(&out.samples[..offset + 500]).unwrap();
            assert!(
                (t as isize - offset as isize).abs() <= 10,
                "changepoint {} true {}",
                t,
                offset
            );
        }
    }
}
