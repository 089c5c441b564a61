//! Additive white Gaussian noise channel
//!
//! The channel model degrades a clean burst so that receivers
//! can be exercised. It can:
//!
//! * add complex Gaussian noise at a target signal-to-noise
//!   ratio (SNR)
//! * rotate the burst by a random carrier phase
//! * drop the burst at a random position within a longer span
//!   of noise
//!
//! All randomness comes from the caller's random number
//! generator. Seed it for reproducible results.

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use std::f32::consts::PI;

use num_complex::Complex;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::builder::ChannelBuilder;
use crate::error::AisError;

/// Output of the channel
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelOutput {
    /// Noisy samples
    pub samples: Vec<Complex<f32>>,

    /// Index of the first burst sample within `samples`
    ///
    /// Present only when the burst is placed within a noise
    /// buffer. This is the ground truth for burst detectors.
    pub offset: Option<usize>,
}

/// AWGN channel with random phase and placement
///
/// Create with a [`ChannelBuilder`]:
///
/// ```
/// use aisburst::ChannelBuilder;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut channel = ChannelBuilder::new(10.0)
///     .with_buffer_len(1000)
///     .build(StdRng::seed_from_u64(1));
///
/// let burst = vec![num_complex::Complex::new(1.0f32, 0.0); 100];
/// let out = channel.propagate(&burst).unwrap();
/// assert_eq!(1000, out.samples.len());
/// assert!(out.offset.unwrap() <= 900);
/// ```
#[derive(Clone, Debug)]
pub struct ChannelModel<R: Rng> {
    snr_db: f32,
    buffer_len: Option<usize>,
    random_phase: bool,
    rng: R,
}

impl<R: Rng> ChannelModel<R> {
    /// Create from configuration and a random number generator
    pub fn new(cfg: &ChannelBuilder, rng: R) -> Self {
        Self {
            snr_db: cfg.snr_db(),
            buffer_len: cfg.buffer_len(),
            random_phase: cfg.random_phase(),
            rng,
        }
    }

    /// Pass a burst through the channel
    ///
    /// The noise power is set relative to the mean power of
    /// `signal`, so the SNR is measured over the burst itself.
    /// An SNR of `f32::INFINITY` adds no noise.
    ///
    /// Fails if `signal` is empty, if the configured noise buffer
    /// is shorter than `signal`, or if the SNR is NaN or
    /// negative infinity.
    pub fn propagate(&mut self, signal: &[Complex<f32>]) -> Result<ChannelOutput, AisError> {
        if signal.is_empty() {
            return Err(AisError::EmptySignal);
        }
        if self.snr_db.is_nan() || self.snr_db == f32::NEG_INFINITY {
            return Err(AisError::InvalidSnr(self.snr_db));
        }
        if let Some(buffer_len) = self.buffer_len {
            if buffer_len < signal.len() {
                return Err(AisError::BufferTooShort {
                    buffer: buffer_len,
                    signal: signal.len(),
                });
            }
        }

        let power = signal.iter().map(|s| s.norm_sqr()).sum::<f32>() / signal.len() as f32;
        let noise_std = (power / 10.0f32.powf(self.snr_db / 10.0) / 2.0).sqrt();
        let noise =
            Normal::new(0.0f32, noise_std).map_err(|_| AisError::InvalidSnr(self.snr_db))?;

        let rotation = if self.random_phase {
            Complex::from_polar(1.0f32, self.rng.gen_range(0.0..2.0 * PI))
        } else {
            Complex::new(1.0f32, 0.0)
        };

        let (mut samples, offset) = match self.buffer_len {
            Some(buffer_len) => {
                let offset = self.rng.gen_range(0..=buffer_len - signal.len());
                (vec![Complex::new(0.0f32, 0.0); buffer_len], Some(offset))
            }
            None => (Vec::with_capacity(signal.len()), None),
        };

        match offset {
            Some(offset) => {
                for (out, sa) in samples[offset..].iter_mut().zip(signal) {
                    *out = sa * rotation;
                }
            }
            None => samples.extend(signal.iter().map(|sa| sa * rotation)),
        }

        if noise_std > 0.0 {
            for sa in samples.iter_mut() {
                *sa += Complex::new(noise.sample(&mut self.rng), noise.sample(&mut self.rng));
            }
        }

        debug!(
            "channel: {} samples, SNR {:.1} dB, noise σ {:.4}, offset {:?}",
            samples.len(),
            self.snr_db,
            noise_std,
            offset
        );

        Ok(ChannelOutput { samples, offset })
    }

    /// Target signal-to-noise ratio (dB)
    pub fn snr_db(&self) -> f32 {
        self.snr_db
    }

    /// Noise buffer length, if any
    pub fn buffer_len(&self) -> Option<usize> {
        self.buffer_len
    }

    /// True if the burst is rotated by a random phase
    pub fn random_phase(&self) -> bool {
        self.random_phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tone(len: usize) -> Vec<Complex<f32>> {
        (0..len)
            .map(|i| Complex::from_polar(1.0f32, 0.1 * i as f32))
            .collect()
    }

    #[test]
    fn test_noiseless() {
        let signal = tone(64);
        let mut channel = ChannelBuilder::new(f32::INFINITY).build(StdRng::seed_from_u64(7));
        let out = channel.propagate(&signal).unwrap();
        assert_eq!(None, out.offset);
        assert_eq!(signal, out.samples);
    }

    #[test]
    fn test_noise_power() {
        let signal = vec![Complex::new(1.0f32, 0.0); 20000];
        let mut channel = ChannelBuilder::new(10.0).build(StdRng::seed_from_u64(8));
        let out = channel.propagate(&signal).unwrap();

        // noise power is one tenth of the signal power
        let noise_power = out
            .samples
            .iter()
            .zip(signal.iter())
            .map(|(y, x)| (y - x).norm_sqr())
            .sum::<f32>()
            / signal.len() as f32;
        assert_approx_eq!(0.1f32, noise_power, 0.01);
    }

    #[test]
    fn test_random_phase() {
        let signal = tone(32);
        let mut channel = ChannelBuilder::new(f32::INFINITY)
            .with_random_phase(true)
            .build(StdRng::seed_from_u64(9));
        let out = channel.propagate(&signal).unwrap();

        // one common rotation for every sample
        let rot = out.samples[0] / signal[0];
        assert_approx_eq!(1.0f32, rot.norm(), 1e-5);
        for (y, x) in out.samples.iter().zip(signal.iter()) {
            let d = (y - x * rot).norm();
            assert!(d < 1e-4);
        }
    }

    #[test]
    fn test_buffer_placement() {
        let signal = tone(50);
        let mut channel = ChannelBuilder::new(f32::INFINITY)
            .with_buffer_len(200)
            .build(StdRng::seed_from_u64(10));

        let mut offsets = Vec::new();
        for _ in 0..20 {
            let out = channel.propagate(&signal).unwrap();
            assert_eq!(200, out.samples.len());

            let offset = out.offset.expect("buffer has offset");
            assert!(offset <= 150);
            assert_eq!(&signal[..], &out.samples[offset..offset + 50]);
            assert!(out.samples[0..offset].iter().all(|s| s.norm() == 0.0));
            offsets.push(offset);
        }
        offsets.dedup();
        assert!(offsets.len() > 1);

        // buffer exactly fits
        let mut channel = ChannelBuilder::new(f32::INFINITY)
            .with_buffer_len(50)
            .build(StdRng::seed_from_u64(11));
        assert_eq!(Some(0), channel.propagate(&signal).unwrap().offset);
    }

    #[test]
    fn test_errors() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut channel = ChannelBuilder::new(10.0)
            .with_buffer_len(10)
            .build(&mut rng);
        assert_eq!(
            Err(AisError::BufferTooShort {
                buffer: 10,
                signal: 20
            }),
            channel.propagate(&tone(20))
        );
        assert_eq!(Err(AisError::EmptySignal), channel.propagate(&[]));

        let mut channel = ChannelBuilder::new(f32::NAN).build(&mut rng);
        assert!(matches!(
            channel.propagate(&tone(20)),
            Err(AisError::InvalidSnr(_))
        ));
    }
}
