//! Bit vectors
//!
//! A [`BitVector`] is the currency between the stages of the
//! framing codec. Bits are stored one per `bool`, in transmission
//! order. Integer fields are read and written most significant
//! bit first.

use std::fmt;
use std::ops::{Deref, DerefMut, Range};
use std::str::FromStr;

use crate::error::AisError;

/// An ordered, growable sequence of bits
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitVector(Vec<bool>);

impl BitVector {
    /// Empty bit vector
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Empty bit vector with room for `cap` bits
    pub fn with_capacity(cap: usize) -> Self {
        Self(Vec::with_capacity(cap))
    }

    /// `len` zero bits
    pub fn zeros(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Append the low `width` bits of `value`, MSB first
    ///
    /// Negative numbers are written in two's complement, so
    /// this method serves both signed and unsigned fields.
    pub fn push_int(&mut self, value: i64, width: usize) {
        debug_assert!(width <= 64);
        for shift in (0..width).rev() {
            self.0.push((value >> shift) & 1 == 1);
        }
    }

    /// Read an unsigned big-endian integer from `range`
    ///
    /// Panics if `range` is outside of the vector or wider
    /// than 64 bits. Callers check lengths first.
    pub fn read_unsigned(&self, range: Range<usize>) -> u64 {
        debug_assert!(range.len() <= 64);
        self.0[range]
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | bit as u64)
    }

    /// Read a two's complement big-endian integer from `range`
    pub fn read_signed(&self, range: Range<usize>) -> i64 {
        let width = range.len();
        let raw = self.read_unsigned(range);
        if width == 0 || width == 64 {
            return raw as i64;
        }
        if raw & (1u64 << (width - 1)) != 0 {
            raw as i64 - (1i64 << width)
        } else {
            raw as i64
        }
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[bool] {
        self.0.as_slice()
    }

    /// Release the inner `Vec`
    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl Deref for BitVector {
    type Target = Vec<bool>;

    fn deref(&self) -> &Vec<bool> {
        &self.0
    }
}

impl DerefMut for BitVector {
    fn deref_mut(&mut self) -> &mut Vec<bool> {
        &mut self.0
    }
}

impl AsRef<[bool]> for BitVector {
    fn as_ref(&self) -> &[bool] {
        self.0.as_slice()
    }
}

impl From<Vec<bool>> for BitVector {
    fn from(v: Vec<bool>) -> Self {
        Self(v)
    }
}

impl From<&[bool]> for BitVector {
    fn from(v: &[bool]) -> Self {
        Self(v.to_vec())
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<bool> for BitVector {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<'a> Extend<&'a bool> for BitVector {
    fn extend<I: IntoIterator<Item = &'a bool>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl IntoIterator for BitVector {
    type Item = bool;
    type IntoIter = std::vec::IntoIter<bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = &'a bool;
    type IntoIter = std::slice::Iter<'a, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for BitVector {
    type Err = AisError;

    /// Parse a string of `0` and `1` characters
    ///
    /// Underscores and whitespace are ignored, so long
    /// sequences may be grouped for readability.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(AisError::MalformedPayload(format!(
                    "'{}' is not a bit",
                    c
                ))),
            })
            .collect()
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let bits: BitVector = "0101_1110 01".parse().expect("bad bits");
        assert_eq!(10, bits.len());
        assert_eq!("0101111001", format!("{}", bits));
        assert!("0120".parse::<BitVector>().is_err());
    }

    #[test]
    fn test_read_write_int() {
        let mut bits = BitVector::new();
        bits.push_int(0b101101, 6);
        bits.push_int(-3, 4);
        assert_eq!("1011011101", bits.to_string());

        assert_eq!(0b101101, bits.read_unsigned(0..6));
        assert_eq!(-3, bits.read_signed(6..10));
        assert_eq!(0b1101, bits.read_unsigned(6..10));
        assert_eq!(6, bits.read_signed(1..5));
    }

    #[test]
    fn test_signed_extremes() {
        let mut bits = BitVector::new();
        bits.push_int(-(1 << 27), 28);
        bits.push_int((1 << 27) - 1, 28);
        assert_eq!(-(1i64 << 27), bits.read_signed(0..28));
        assert_eq!((1i64 << 27) - 1, bits.read_signed(28..56));
    }
}
