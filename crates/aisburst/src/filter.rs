//! # FIR linear filters
//!
//! The [`FilterCoeff`] holds the impulse response `h` of a Finite
//! Impulse Response filter. [`FilterCoeff::convolve()`] filters a
//! whole burst at once and returns the *full* convolution,
//! including the transients at either end:
//!
//! ```txt
//! y[n] = Σ h[k] · x[n − k],   n = 0 .. len(x) + len(h) − 1
//! ```
//!
//! where `x` is zero outside of its range.

use std::convert::AsRef;

use nalgebra::base::Scalar;
use nalgebra::DVector;
use num_traits::{One, Zero};

/// FIR filter coefficients
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq)]
pub struct FilterCoeff<T>(DVector<T>)
where
    T: Copy + Scalar + One + Zero;

impl<T> FilterCoeff<T>
where
    T: Copy + Scalar + One + Zero,
{
    /// Create from an impulse response
    ///
    /// `h[0]` is the tap applied to the newest sample. The taps
    /// are stored reversed.
    pub fn from_slice<S>(h: S) -> Self
    where
        S: AsRef<[T]>,
    {
        let inp = h.as_ref();
        FilterCoeff(DVector::from_iterator(
            inp.len(),
            inp.iter().rev().copied(),
        ))
    }

    /// Number of filter coefficients
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no coefficients
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One output sample from a window of input
    ///
    /// `history[N-1]` is the newest sample and `history[0]` the
    /// oldest. This is the inner step of [`convolve()`](Self::convolve).
    pub fn filter<I, In, Out>(&self, history: I) -> Out
    where
        I: AsRef<[In]>,
        In: Copy + Scalar + std::ops::Mul<T, Output = Out>,
        Out: Copy + Scalar + Zero + std::ops::AddAssign,
    {
        multiply_accumulate(history.as_ref(), self.as_ref())
    }

    /// Full convolution with `input`
    ///
    /// The input is treated as zero outside of its range. The
    /// output has `input.len() + self.len() - 1` samples: the
    /// first output sample sees only `input[0]`, and the last
    /// sees only the final input sample. An empty input or
    /// filter convolves to nothing.
    pub fn convolve<In, Out>(&self, input: &[In]) -> Vec<Out>
    where
        In: Copy + Scalar + Zero + std::ops::Mul<T, Output = Out>,
        Out: Copy + Scalar + Zero + std::ops::AddAssign,
    {
        if input.is_empty() || self.is_empty() {
            return Vec::new();
        }

        let pad = self.len() - 1;
        let mut padded = Vec::with_capacity(input.len() + 2 * pad);
        padded.extend(std::iter::repeat(In::zero()).take(pad));
        padded.extend_from_slice(input);
        padded.extend(std::iter::repeat(In::zero()).take(pad));

        padded
            .windows(self.len())
            .map(|history| self.filter(history))
            .collect()
    }

    /// Return filter coefficients as slice
    ///
    /// The filter coefficients are in *reverse* order
    /// from their Octave representation.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }
}

impl<T> AsRef<[T]> for FilterCoeff<T>
where
    T: Copy + Scalar + One + Zero,
{
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> std::ops::Index<usize> for FilterCoeff<T>
where
    T: Copy + Scalar + One + Zero,
{
    type Output = T;

    #[inline]
    fn index(&self, ind: usize) -> &T {
        self.0.index(ind)
    }
}

// Multiply-accumulate operation
//
// Calculates the sum of the element-wise multiplication,
//
// ```txt
// out = Σ history[i] * coeff[i]
// ```
//
// The most recent sample is stored in `history[N-1]`, and the
// least recent sample in `history[0]`. The filter coefficients
// are stored *reversed* in `rev_coeff`, with `rev_coeff[N-1]`
// being the zeroth filter coefficient.
//
// The two slices need not be the same length. If `history` is
// shorter than `rev_coeff`, then the sample history is assumed
// to be zero outside of its range.
fn multiply_accumulate<In, Coeff, Out>(history: &[In], rev_coeff: &[Coeff]) -> Out
where
    In: Copy + Scalar + std::ops::Mul<Coeff, Output = Out>,
    Coeff: Copy + Scalar,
    Out: Copy + Scalar + Zero + std::ops::AddAssign,
{
    let mul_len = usize::min(history.len(), rev_coeff.len());
    let history = &history[history.len() - mul_len..];
    let rev_coeff = &rev_coeff[rev_coeff.len() - mul_len..];

    let mut out = Out::zero();
    for (hi, co) in history.iter().zip(rev_coeff.iter()) {
        out += *hi * *co;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    use num_complex::Complex;

    #[test]
    fn test_multiply_accumulate() {
        // trivial MAC is zero
        let out = multiply_accumulate(&[0.0f32; 0], &[0.0f32; 0]);
        assert_eq!(0.0f32, out);

        // simple multiplies; we clip to the end
        let out = multiply_accumulate(&[20.0f32, 1.0f32], &[1.0f32]);
        assert_eq!(1.0f32, out);
        let out = multiply_accumulate(&[1.0f32], &[20.0f32, 1.0f32]);
        assert_eq!(1.0f32, out);

        let out = multiply_accumulate(&[20.0f32, 20.0f32], &[-1.0f32, 1.0f32]);
        assert_approx_eq!(0.0f32, out);
    }

    #[test]
    fn test_filter_cplx() {
        const INPUT: &[Complex<f32>] = &[Complex {
            re: 0.5f32,
            im: 0.5f32,
        }];

        let filter = FilterCoeff::from_slice(&[2.0f32, 0.0f32, 0.0f32]);

        let out = filter.filter(INPUT);
        assert_approx_eq!(out.re, 1.0f32);
        assert_approx_eq!(out.im, 1.0f32);
    }

    #[test]
    fn test_convolve() {
        let filter = FilterCoeff::from_slice(&[1.0f32, 2.0f32, 3.0f32]);
        assert_eq!(3.0f32, filter[0]);

        let out: Vec<f32> = filter.convolve(&[1.0f32, 0.0f32, -1.0f32, 2.0f32]);
        assert_eq!(vec![1.0f32, 2.0, 2.0, 0.0, 1.0, 6.0], out);

        // impulse in, impulse response out
        let out: Vec<f32> = filter.convolve(&[1.0f32]);
        assert_eq!(vec![1.0f32, 2.0, 3.0], out);

        let out: Vec<f32> = filter.convolve(&[0.0f32; 0]);
        assert!(out.is_empty());
    }
}
