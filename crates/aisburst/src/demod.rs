//! GMSK demodulation
//!
//! A non-coherent differential detector. Each sample is
//! multiplied by the complex conjugate of the sample one symbol
//! earlier. The angle of the product is the phase advance over
//! that symbol: negative for a one, positive for a zero. No
//! carrier phase recovery is required.
//!
//! A constant carrier frequency offset biases every phase
//! advance by the same amount. It may be removed first with
//! [`compensate_frequency_shift()`](GmskDemodulator::compensate_frequency_shift).

#[cfg(not(test))]
use log::trace;

#[cfg(test)]
use std::println as trace;

use std::f64::consts::PI;

use num_complex::Complex;
use rustfft::FftPlanner;

use crate::bits::BitVector;
use crate::builder::GmskBuilder;
use crate::error::AisError;

/// GMSK differential demodulator
#[derive(Clone, Debug)]
pub struct GmskDemodulator {
    sample_rate: f32,
    upsampling: usize,
}

impl GmskDemodulator {
    /// Remove a constant carrier frequency offset
    ///
    /// Estimates the offset as the centroid of the signal's power
    /// spectrum and de-rotates the signal by it. A burst with
    /// balanced data has a centroid near zero, so any residual
    /// centroid is attributed to the carrier.
    ///
    /// Signals with no power are returned unchanged. An empty
    /// signal is an error.
    pub fn compensate_frequency_shift(
        &self,
        signal: &[Complex<f32>],
    ) -> Result<Vec<Complex<f32>>, AisError> {
        let offset_hz = self.estimate_frequency_offset(signal)?;
        let fs = self.sample_rate as f64;

        Ok(signal
            .iter()
            .enumerate()
            .map(|(n, sa)| {
                let theta = -2.0 * PI * offset_hz * n as f64 / fs;
                sa * Complex::from_polar(1.0f32, theta as f32)
            })
            .collect())
    }

    /// Estimate a carrier frequency offset (Hz)
    ///
    /// Returns the power-weighted mean of the frequencies of
    /// the signal's DFT bins. Bins above half the sampling rate
    /// are counted as negative frequencies. A signal with no
    /// power has no offset. An empty signal is an error.
    pub fn estimate_frequency_offset(&self, signal: &[Complex<f32>]) -> Result<f64, AisError> {
        let n = signal.len();
        if n == 0 {
            return Err(AisError::EmptySignal);
        }

        let mut spectrum = signal.to_vec();
        let fft = FftPlanner::<f32>::new().plan_fft_forward(n);
        fft.process(&mut spectrum);

        let fs = self.sample_rate as f64;
        let (mut total, mut weighted) = (0.0f64, 0.0f64);
        for (k, bin) in spectrum.iter().enumerate() {
            let signed = if k >= (n + 1) / 2 {
                k as f64 - n as f64
            } else {
                k as f64
            };
            let psd = bin.norm_sqr() as f64;
            total += psd;
            weighted += psd * signed * fs / n as f64;
        }

        if total > 0.0 {
            let offset = weighted / total;
            trace!("demod: estimated frequency offset {:.1} Hz", offset);
            Ok(offset)
        } else {
            Ok(0.0)
        }
    }

    /// Demodulate to hard bit decisions
    ///
    /// The phase advance over each symbol is sampled once per
    /// symbol, starting at the end of the second symbol and
    /// stopping one symbol before the end of the `signal`. A
    /// negative advance decodes as one.
    ///
    /// For a burst from
    /// [`GmskModulator::modulate()`](crate::GmskModulator::modulate)
    /// with a one-symbol filter, output bit `m` is input bit `m`.
    ///
    /// Signals shorter than three symbols are an error.
    pub fn demodulate(&self, signal: &[Complex<f32>]) -> Result<BitVector, AisError> {
        let sps = self.upsampling;
        let needed = 3 * sps;
        if signal.len() < needed {
            return Err(AisError::SignalTooShort {
                len: signal.len(),
                needed,
            });
        }

        Ok((2 * sps - 1..signal.len() - sps)
            .step_by(sps)
            .map(|n| (signal[n] * signal[n - sps].conj()).arg() < 0.0)
            .collect())
    }

    /// Input sampling rate (Hz)
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Samples per symbol
    pub fn upsampling(&self) -> usize {
        self.upsampling
    }
}

impl From<&GmskBuilder> for GmskDemodulator {
    fn from(cfg: &GmskBuilder) -> Self {
        Self {
            sample_rate: cfg.sample_rate(),
            upsampling: cfg.upsampling(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    fn bits(s: &str) -> BitVector {
        s.parse().expect("bad test bits")
    }

    #[test]
    fn test_demodulate_aligned() {
        let cfg = GmskBuilder::default();
        let modulator = cfg.build_modulator();
        let demod = cfg.build_demodulator();

        let input = bits("0110_1000_1110_0101_0011_1101_1000_0010");
        let out = demod.demodulate(&modulator.modulate(&input).unwrap()).unwrap();
        assert_eq!(input, out);
    }

    #[test]
    fn test_demodulate_rotated() {
        // carrier phase does not matter
        let cfg = GmskBuilder::default();
        let input = bits("1100_1010_0111_0001");
        let rotation = Complex::from_polar(1.0f32, 2.1);
        let signal: Vec<Complex<f32>> = cfg
            .build_modulator()
            .modulate(&input)
            .unwrap()
            .iter()
            .map(|s| s * rotation)
            .collect();
        assert_eq!(input, cfg.build_demodulator().demodulate(&signal).unwrap());
    }

    #[test]
    fn test_demodulate_short() {
        let demod = GmskBuilder::default().build_demodulator();
        assert_eq!(
            Err(AisError::SignalTooShort {
                len: 29,
                needed: 30
            }),
            demod.demodulate(&[Complex::new(1.0f32, 0.0); 29])
        );
        assert_eq!(1, demod.demodulate(&[Complex::new(1.0f32, 0.0); 30]).unwrap().len());
    }

    #[test]
    fn test_frequency_offset() {
        let demod = GmskBuilder::default().build_demodulator();
        let fs = demod.sample_rate() as f64;

        // a pure tone lands on one bin
        let bin = 20usize;
        let n = 960usize;
        let tone: Vec<Complex<f32>> = (0..n)
            .map(|i| {
                let theta = 2.0 * PI * (bin as f64) * i as f64 / n as f64;
                Complex::from_polar(1.0f32, theta as f32)
            })
            .collect();
        assert_approx_eq!(
            bin as f64 * fs / n as f64,
            demod.estimate_frequency_offset(&tone).unwrap(),
            1.0
        );

        // and is brought to DC
        let fixed = demod.compensate_frequency_shift(&tone).unwrap();
        for sa in &fixed {
            assert_approx_eq!(1.0f32, sa.re, 1e-2);
        }

        // negative frequencies are negative
        let conj: Vec<Complex<f32>> = tone.iter().map(|s| s.conj()).collect();
        assert_approx_eq!(
            -(bin as f64) * fs / n as f64,
            demod.estimate_frequency_offset(&conj).unwrap(),
            1.0
        );

        // silence has no offset
        let silence = [Complex::new(0.0f32, 0.0); 64];
        assert_eq!(Ok(0.0), demod.estimate_frequency_offset(&silence));
        assert_eq!(
            silence.to_vec(),
            demod.compensate_frequency_shift(&silence).unwrap()
        );
    }

    #[test]
    fn test_frequency_offset_empty() {
        let demod = GmskBuilder::default().build_demodulator();
        assert_eq!(
            Err(AisError::EmptySignal),
            demod.estimate_frequency_offset(&[])
        );
        assert_eq!(
            Err(AisError::EmptySignal),
            demod.compensate_frequency_shift(&[])
        );
    }

    #[test]
    fn test_compensation_then_demodulate() {
        let cfg = GmskBuilder::default();
        let input = bits("0101_1100_1001_0110_1110_0001_0101_1010");
        let signal = cfg.build_modulator().modulate(&input).unwrap();

        // a small carrier offset
        let fs = cfg.sample_rate() as f64;
        let shifted: Vec<Complex<f32>> = signal
            .iter()
            .enumerate()
            .map(|(n, s)| s * Complex::from_polar(1.0f32, (2.0 * PI * 150.0 * n as f64 / fs) as f32))
            .collect();

        let demod = cfg.build_demodulator();
        let fixed = demod.compensate_frequency_shift(&shifted).unwrap();
        assert_eq!(input, demod.demodulate(&fixed).unwrap());
    }
}
