//! Recorded I/Q sample text
//!
//! Recordings are plain text with one sample per line: the
//! in-phase component, whitespace, then the quadrature component.
//!
//! ```txt
//! 0.7071 -0.7071
//! 1.0e-3 0.9999
//! ```

use num_complex::Complex;

use crate::error::AisError;

/// Parse two-column I/Q text into complex samples
///
/// Blank lines are skipped. Any other line must contain exactly
/// two floating-point numbers, or parsing fails with the
/// one-based line number of the offending line.
///
/// ```
/// let samples = aisburst::parse_iq_text("1.0 0.0\n\n-0.5 0.25\n").unwrap();
/// assert_eq!(2, samples.len());
/// assert_eq!(0.25, samples[1].im);
/// ```
pub fn parse_iq_text(text: &str) -> Result<Vec<Complex<f32>>, AisError> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let mut cols = line.split_whitespace();
        let (re, im) = match (cols.next(), cols.next(), cols.next()) {
            (None, _, _) => continue,
            (Some(re), Some(im), None) => (re, im),
            _ => return Err(AisError::MalformedSample { line: i + 1 }),
        };

        match (re.parse::<f32>(), im.parse::<f32>()) {
            (Ok(re), Ok(im)) => out.push(Complex::new(re, im)),
            _ => return Err(AisError::MalformedSample { line: i + 1 }),
        }
    }
    Ok(out)
}
