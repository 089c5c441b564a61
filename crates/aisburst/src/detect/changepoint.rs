//! Maximum-likelihood power changepoint
//!
//! Models a trace as two segments of zero-mean Gaussian samples
//! with unknown, different variances. The burst begins where the
//! variance changes. With the variances integrated out, the log
//! likelihood of a split at `t` in a trace of `N` samples is
//!
//! ```txt
//! ℓ(t) = −½(t+5)·ln S₁ − ½(N−t−7)·ln S₂ + lnΓ(½(t+5)) + lnΓ(½(N−t−3))
//! ```
//!
//! where `S₁` is the energy before `t` and `S₂` is the energy
//! from `t` onwards. Prefix sums make each candidate O(1).

use num_complex::Complex;

use crate::error::AisError;

/// Candidates this close to either end are never considered
const MARGIN: usize = 10;

/// Estimate the changepoint of a real-valued trace
///
/// Returns the index `t` of the first sample of the second
/// segment. Candidates are `t ∈ [10, N − 10)`; the first of
/// several equally likely candidates wins. Traces of 20 samples
/// or fewer are an error.
///
/// Non-finite samples carry no energy, so a stray NaN or
/// infinity cannot move the estimate.
pub fn estimate_changepoint(trace: &[f32]) -> Result<usize, AisError> {
    let len = trace.len();
    if len <= 2 * MARGIN {
        return Err(AisError::SignalTooShort {
            len,
            needed: 2 * MARGIN + 1,
        });
    }

    // cumulative[i] is the energy of trace[..i]
    let mut cumulative = Vec::with_capacity(len + 1);
    cumulative.push(0.0f64);
    let mut acc = 0.0f64;
    for &y in trace {
        let energy = y as f64 * y as f64;
        if energy.is_finite() {
            acc += energy;
        }
        cumulative.push(acc);
    }
    let total = acc;

    let n = len as f64;
    let mut best: Option<(f64, usize)> = None;
    for t in MARGIN..len - MARGIN {
        let s1 = f64::max(cumulative[t], f64::MIN_POSITIVE);
        let s2 = f64::max(total - cumulative[t], f64::MIN_POSITIVE);
        let tf = t as f64;

        let ll = -0.5 * (tf + 5.0) * s1.ln() - 0.5 * (n - tf - 7.0) * s2.ln()
            + ln_gamma(0.5 * (tf + 5.0))
            + ln_gamma(0.5 * (n - tf - 3.0));

        match best {
            _ if ll.is_nan() => {}
            Some((best_ll, _)) if ll <= best_ll => {}
            _ => best = Some((ll, t)),
        }
    }

    Ok(best.map(|(_, t)| t).unwrap_or(MARGIN))
}

/// Estimate the changepoint of a complex waveform
///
/// Runs [`estimate_changepoint()`] on the sample magnitudes.
pub fn estimate_changepoint_waveform(signal: &[Complex<f32>]) -> Result<usize, AisError> {
    let magnitude: Vec<f32> = signal.iter().map(|s| s.norm()).collect();
    estimate_changepoint(&magnitude)
}

// Natural log of the gamma function
//
// Lanczos approximation with g = 7 and nine coefficients. Every
// argument here is at least 3.5, so no reflection is needed.
fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFF: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_571_6e-6,
        1.505_632_735_149_311_6e-7,
    ];

    let z = x - 1.0;
    let mut sum = COEFF[0];
    for (i, c) in COEFF.iter().enumerate().skip(1) {
        sum += c / (z + i as f64);
    }
    let t = z + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (z + 0.5) * t.ln() - t + sum.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_ln_gamma() {
        // Γ(n) = (n-1)!
        assert_approx_eq!(0.0, ln_gamma(1.0), 1e-10);
        assert_approx_eq!(0.0, ln_gamma(2.0), 1e-10);
        assert_approx_eq!(24.0f64.ln(), ln_gamma(5.0), 1e-10);
        assert_approx_eq!(3_628_800.0f64.ln(), ln_gamma(11.0), 1e-9);

        // Γ(1/2) = √π
        assert_approx_eq!(0.5 * std::f64::consts::PI.ln(), ln_gamma(0.5), 1e-10);
    }

    #[test]
    fn test_step_in_noise() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let quiet = Normal::new(0.0f32, 0.1).unwrap();
        let loud = Normal::new(0.0f32, 1.0).unwrap();

        let mut trace: Vec<f32> = (0..300).map(|_| quiet.sample(&mut rng)).collect();
        trace.extend((0..500).map(|_| loud.sample(&mut rng)));

        let t = estimate_changepoint(&trace).unwrap();
        assert!((295..=305).contains(&t), "changepoint {}", t);
    }

    #[test]
    fn test_non_finite_samples() {
        let mut rng = StdRng::seed_from_u64(0xBAD);
        let quiet = Normal::new(0.0f32, 0.1).unwrap();
        let loud = Normal::new(0.0f32, 1.0).unwrap();

        let mut trace: Vec<f32> = (0..50).map(|_| quiet.sample(&mut rng)).collect();
        trace.extend((0..50).map(|_| loud.sample(&mut rng)));
        trace[30] = f32::NAN;
        trace[70] = f32::INFINITY;

        let t = estimate_changepoint(&trace).unwrap();
        assert!((44..=57).contains(&t), "changepoint {}", t);
    }

    #[test]
    fn test_waveform() {
        let mut rng = StdRng::seed_from_u64(42);
        let noise = Normal::new(0.0f32, 0.05).unwrap();

        let mut signal: Vec<Complex<f32>> = (0..400)
            .map(|_| Complex::new(noise.sample(&mut rng), noise.sample(&mut rng)))
            .collect();
        signal.extend((0..400).map(|i| {
            Complex::from_polar(1.0f32, 0.3 * i as f32)
                + Complex::new(noise.sample(&mut rng), noise.sample(&mut rng))
        }));

        let t = estimate_changepoint_waveform(&signal).unwrap();
        assert!((398..=402).contains(&t), "changepoint {}", t);
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(
            Err(AisError::SignalTooShort { len: 20, needed: 21 }),
            estimate_changepoint(&[1.0f32; 20])
        );

        // silence is not an error
        let t = estimate_changepoint(&[0.0f32; 64]).unwrap();
        assert!((10..54).contains(&t));

        // a single candidate
        assert_eq!(10, estimate_changepoint(&[1.0f32; 21]).unwrap());
    }
}
