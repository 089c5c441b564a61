//! GMSK modulation
//!
//! Gaussian Minimum Shift Keying is continuous-phase FSK with a
//! modulation index of one half. Before it steers the phase, the
//! NRZ symbol stream is smoothed by a Gaussian low-pass filter.
//! The filter narrows the occupied bandwidth at the cost of some
//! intersymbol interference.
//!
//! The modulator runs in four steps:
//!
//! 1. Map bits to ±1 and hold each for one symbol
//!    ([`to_nrz()`](GmskModulator::to_nrz))
//! 2. Convolve with the Gaussian pulse
//!    ([`gaussian_pulse()`](GmskModulator::gaussian_pulse))
//! 3. Integrate to obtain the phase
//! 4. Output the complex baseband `cos φ − j·sin φ`

use std::f64::consts::PI;

use num_complex::Complex;

use crate::builder::GmskBuilder;
use crate::error::AisError;
use crate::filter::FilterCoeff;

/// GMSK modulator
///
/// Converts line levels into complex baseband samples. Create
/// with a [`GmskBuilder`]:
///
/// ```
/// use aisburst::GmskBuilder;
///
/// let modulator = GmskBuilder::default().build_modulator();
/// let samples = modulator.modulate(&[true, false, true]).unwrap();
/// assert_eq!(3 * 10 + 2 * 10, samples.len());
/// ```
#[derive(Clone, Debug)]
pub struct GmskModulator {
    sample_rate: f32,
    upsampling: usize,
    bt: f32,
    filter_length: usize,
    mod_index: f32,
    pulse: Vec<f32>,
    filter: FilterCoeff<f32>,
}

impl GmskModulator {
    /// NRZ-encode and upsample
    ///
    /// Zero bits become `-1.0` and one bits become `+1.0`. Each
    /// level is repeated for the number of samples in a symbol.
    pub fn to_nrz(&self, bits: &[bool]) -> Vec<f32> {
        bits.iter()
            .flat_map(|&bit| {
                let level = if bit { 1.0f32 } else { -1.0f32 };
                std::iter::repeat(level).take(self.upsampling)
            })
            .collect()
    }

    /// Gaussian pulse-shaping filter
    ///
    /// The impulse response spans `filter_length` symbols on
    /// either side of its peak and has unit sum. Its length is
    /// `2 · filter_length · upsampling + 1` samples.
    pub fn gaussian_pulse(&self) -> &[f32] {
        &self.pulse
    }

    /// Modulate line levels into complex baseband
    ///
    /// The output has `upsampling` samples per input bit, plus
    /// a transient of `filter_length` symbols at each end. Its
    /// magnitude is always one.
    pub fn modulate(&self, bits: &[bool]) -> Result<Vec<Complex<f32>>, AisError> {
        if bits.is_empty() {
            return Err(AisError::EmptySignal);
        }

        let shaped: Vec<f32> = self.filter.convolve(&self.to_nrz(bits));
        let peak = shaped.iter().fold(0.0f32, |acc, x| f32::max(acc, x.abs()));
        let peak = if peak > 0.0 { peak as f64 } else { 1.0 };

        // discrete integrator, 1 / (1 − z⁻¹), scaled by 1/fs
        let symbol_duration = self.upsampling as f64 / self.sample_rate as f64;
        let gain = PI * self.mod_index as f64 / symbol_duration / self.sample_rate as f64 / peak;

        let mut phase = 0.0f64;
        Ok(shaped
            .iter()
            .map(|&x| {
                phase += x as f64 * gain;
                Complex::new(phase.cos() as f32, -phase.sin() as f32)
            })
            .collect())
    }

    /// Output sampling rate (Hz)
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Samples per symbol
    pub fn upsampling(&self) -> usize {
        self.upsampling
    }

    /// Bandwidth-time product of the Gaussian filter
    pub fn bt(&self) -> f32 {
        self.bt
    }

    /// Gaussian filter half-length (symbols)
    pub fn filter_length(&self) -> usize {
        self.filter_length
    }

    /// Modulation index
    pub fn mod_index(&self) -> f32 {
        self.mod_index
    }
}

impl From<&GmskBuilder> for GmskModulator {
    fn from(cfg: &GmskBuilder) -> Self {
        let pulse = gaussian_pulse(
            cfg.upsampling(),
            cfg.filter_length(),
            cfg.bt(),
        );
        let filter = FilterCoeff::from_slice(&pulse);
        Self {
            sample_rate: cfg.sample_rate(),
            upsampling: cfg.upsampling(),
            bt: cfg.bt(),
            filter_length: cfg.filter_length(),
            mod_index: cfg.mod_index(),
            pulse,
            filter,
        }
    }
}

// Gaussian low-pass impulse response
//
// Time is measured in symbols, so the symbol duration T is one
// and B = BT. The response has variance
//
// ```txt
// σ² = ln 2 / (2π·B)²
// ```
//
// and is sampled at `t = -L + k/U` for `k = 0 ..= 2·L·U`. The
// taps are normalized to unit sum.
fn gaussian_pulse(upsampling: usize, filter_length: usize, bt: f32) -> Vec<f32> {
    let bandwidth = bt as f64;
    let variance = std::f64::consts::LN_2 / (2.0 * PI * bandwidth).powi(2);
    let ntaps = 2 * filter_length * upsampling + 1;

    let taps: Vec<f64> = (0..ntaps)
        .map(|k| {
            let t = -(filter_length as f64) + k as f64 / upsampling as f64;
            (-t * t / (2.0 * variance)).exp()
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    taps.iter().map(|&h| (h / sum) as f32).collect()
}
